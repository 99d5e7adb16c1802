use std::collections::VecDeque;

use crate::frame::{FRAME_HEIGHT, FRAME_WIDTH};

/// A cell on the board. The board is a torus, so coordinates wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Normalize into `0..44` x `0..11`.
    pub fn wrapped(self) -> Self {
        Self {
            x: self.x.rem_euclid(FRAME_WIDTH as i32),
            y: self.y.rem_euclid(FRAME_HEIGHT as i32),
        }
    }

    /// Neighbor in direction `step`, wrapped onto the board.
    pub fn stepped(self, step: Step) -> Self {
        Self::new(self.x + step.dx, self.y + step.dy).wrapped()
    }

    /// Pixel coordinates of a wrapped position.
    pub fn pixel(self) -> (usize, usize) {
        let p = self.wrapped();
        (p.x as usize, p.y as usize)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Unit move vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub dx: i32,
    pub dy: i32,
}

impl Step {
    pub const RIGHT: Step = Step { dx: 1, dy: 0 };
    pub const LEFT: Step = Step { dx: -1, dy: 0 };
    pub const DOWN: Step = Step { dx: 0, dy: 1 };
    pub const UP: Step = Step { dx: 0, dy: -1 };

    /// Quarter turn: `(dx, dy) -> (-dy, dx)`.
    pub fn rotated(self) -> Self {
        Self {
            dx: -self.dy,
            dy: self.dx,
        }
    }

    /// Step that closes the x gap first, then the y gap.
    ///
    /// Distances are measured on the plain grid, not around the torus.
    pub fn toward(from: Position, to: Position) -> Self {
        if from.x < to.x {
            Step::RIGHT
        } else if from.x > to.x {
            Step::LEFT
        } else if from.y < to.y {
            Step::DOWN
        } else {
            Step::UP
        }
    }
}

/// Snake body, head first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    pub fn new(segments: impl IntoIterator<Item = Position>) -> Self {
        Self {
            body: segments.into_iter().map(Position::wrapped).collect(),
        }
    }

    pub fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Whether moving the head by `step` lands on the body (head excluded).
    ///
    /// The target is compared before wrapping, so a move across a board edge
    /// is never seen as blocked. The snake can run into itself that way, which
    /// is how it dies.
    pub fn would_collide(&self, step: Step) -> bool {
        let Some(head) = self.head() else {
            return false;
        };
        let target = Position::new(head.x + step.dx, head.y + step.dy);
        self.body.iter().skip(1).any(|&p| p == target)
    }

    /// Whether any two segments share a cell.
    pub fn self_intersects(&self) -> bool {
        self.body
            .iter()
            .enumerate()
            .any(|(i, a)| self.body.iter().skip(i + 1).any(|b| a == b))
    }

    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }
}
