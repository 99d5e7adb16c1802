//! Snake state machine and the frame slots it records into.

use rand::prelude::*;

use super::footer::append_footer;
use super::state::{Position, Snake, Step};
use super::SimulationError;
use crate::frame::{FRAME_HEIGHT, FRAME_WIDTH, FrameError, FrameGrid, FrameSequence, MAX_FRAMES};
use crate::schema::SimulatorConfig;

/// Candidate moves tried per step: the direct one, then two quarter turns.
pub const MOVE_ATTEMPTS: usize = 3;

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Chasing fruit.
    Running,
    /// Shrinking by one segment per step.
    Dying,
    /// Snake fully consumed.
    Done,
}

/// What a logic step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { ate: bool },
    /// Every candidate move hit the body; nothing changed.
    Blocked,
    /// Moved into itself and started dying.
    Died,
    Shrunk,
    Finished,
}

/// Snake, fruit and phase. Contains no frame data.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorState {
    snake: Snake,
    fruit: Position,
    phase: Phase,
    fruit_eaten: usize,
    longest: usize,
}

impl SimulatorState {
    /// Create a state with an explicit fruit position.
    pub fn new(snake: Snake, fruit: Position) -> Self {
        let longest = snake.len();
        Self {
            snake,
            fruit: fruit.wrapped(),
            phase: Phase::Running,
            fruit_eaten: 0,
            longest,
        }
    }

    /// Create a state with a randomly placed fruit.
    pub fn spawn<R: Rng>(snake: Snake, rng: &mut R) -> Self {
        let mut state = Self::new(snake, Position::new(0, 0));
        state.place_fruit(rng);
        state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> Position {
        self.fruit
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn fruit_eaten(&self) -> usize {
        self.fruit_eaten
    }

    /// Move the fruit to a uniformly random cell not covered by the snake.
    ///
    /// Returns false, leaving the fruit in place, when the snake covers the
    /// whole board.
    pub fn place_fruit<R: Rng>(&mut self, rng: &mut R) -> bool {
        let free: Vec<Position> = (0..FRAME_WIDTH as i32)
            .flat_map(|x| (0..FRAME_HEIGHT as i32).map(move |y| Position::new(x, y)))
            .filter(|&p| !self.snake.contains(p))
            .collect();

        match free.choose(rng) {
            Some(&cell) => {
                self.fruit = cell;
                true
            }
            None => {
                log::warn!("No free cell left for fruit");
                false
            }
        }
    }

    /// First of the candidate moves toward the fruit that avoids the body.
    pub fn choose_step(&self) -> Option<Step> {
        let head = self.snake.head()?;
        let mut step = Step::toward(head, self.fruit);
        for _ in 0..MOVE_ATTEMPTS {
            if !self.snake.would_collide(step) {
                return Some(step);
            }
            step = step.rotated();
        }
        None
    }

    /// Switch to dying regardless of the current phase (unless already done).
    pub fn kill(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Dying;
        }
    }

    /// Advance the simulation by one tick.
    pub fn step_logic<R: Rng>(&mut self, rng: &mut R) -> StepOutcome {
        match self.phase {
            Phase::Running => self.step_running(rng),
            Phase::Dying => {
                self.snake.pop_tail();
                if self.snake.is_empty() {
                    self.phase = Phase::Done;
                    StepOutcome::Finished
                } else {
                    StepOutcome::Shrunk
                }
            }
            Phase::Done => StepOutcome::Finished,
        }
    }

    fn step_running<R: Rng>(&mut self, rng: &mut R) -> StepOutcome {
        let (Some(head), Some(step)) = (self.snake.head(), self.choose_step()) else {
            log::debug!("No free move for the snake, skipping step");
            return StepOutcome::Blocked;
        };

        let new_head = head.stepped(step);
        self.snake.push_head(new_head);

        let ate = new_head == self.fruit;
        if ate {
            self.fruit_eaten += 1;
            self.longest = self.longest.max(self.snake.len());
            self.place_fruit(rng);
            log::debug!("Fruit eaten, snake length {}", self.snake.len());
        } else {
            self.snake.pop_tail();
        }

        if self.snake.self_intersects() {
            self.phase = Phase::Dying;
            return StepOutcome::Died;
        }
        StepOutcome::Moved { ate }
    }

    /// Light the snake and the fruit in `frame`.
    pub fn draw(&self, frame: &mut FrameGrid) -> Result<(), FrameError> {
        for segment in self.snake.segments() {
            let (x, y) = segment.pixel();
            frame.set(x, y, true)?;
        }
        let (x, y) = self.fruit.pixel();
        frame.set(x, y, true)
    }
}

/// Appends frames across slots, opening a new slot when one fills up.
#[derive(Debug, Clone)]
pub struct SlotWriter {
    slots: Vec<FrameSequence>,
    frames_per_slot: usize,
    max_slots: usize,
    frames_written: usize,
}

impl SlotWriter {
    pub fn new(frames_per_slot: usize, max_slots: usize) -> Self {
        Self {
            slots: Vec::new(),
            frames_per_slot: frames_per_slot.clamp(1, MAX_FRAMES),
            max_slots,
            frames_written: 0,
        }
    }

    /// Append a blank frame and return it for drawing.
    pub fn push_frame(&mut self) -> Result<&mut FrameGrid, SimulationError> {
        let has_room = self
            .slots
            .last()
            .is_some_and(|slot| slot.len() < self.frames_per_slot);

        if has_room {
            let last = self.slots.len() - 1;
            self.slots[last].push_blank();
        } else {
            if self.slots.len() >= self.max_slots {
                return Err(SimulationError::SlotsExhausted {
                    slots: self.max_slots,
                    frames_per_slot: self.frames_per_slot,
                });
            }
            self.slots.push(FrameSequence::new());
            log::info!("Opened slot {}", self.slots.len() - 1);
        }

        self.frames_written += 1;
        let last = self.slots.len() - 1;
        Ok(self.slots[last].current_frame_mut())
    }

    /// Frames appended across all slots.
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn slots(&self) -> &[FrameSequence] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<FrameSequence> {
        self.slots
    }
}

/// Figures reported after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationSummary {
    pub frame_budget: usize,
    pub frames: usize,
    pub slots: usize,
    pub fruit_eaten: usize,
    pub longest_snake: usize,
    /// Frame index on which the snake started dying.
    pub death_frame: Option<usize>,
    /// True when the budget ran out before the snake hit itself.
    pub forced_death: bool,
}

impl std::fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames in {} slot(s), {} fruit eaten, longest snake {}",
            self.frames, self.slots, self.fruit_eaten, self.longest_snake
        )?;
        if let Some(frame) = self.death_frame {
            let cause = if self.forced_death { "budget" } else { "collision" };
            write!(f, ", died on frame {} ({})", frame, cause)?;
        }
        Ok(())
    }
}

/// Recorded slots plus run statistics.
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub slots: Vec<FrameSequence>,
    pub summary: SimulationSummary,
}

/// Drives [`SimulatorState`] and records one frame per logic step.
///
/// Usage:
/// ```ignore
/// let simulator = SnakeSimulator::new(SimulatorConfig::default(), 10)?;
/// let output = simulator.run()?;
/// store.save("snake", &output.slots)?;
/// ```
pub struct SnakeSimulator {
    config: SimulatorConfig,
    frame_budget: usize,
    state: SimulatorState,
    writer: SlotWriter,
    rng: StdRng,
    death_frame: Option<usize>,
    forced_death: bool,
}

impl SnakeSimulator {
    /// Prepare a run for an animation of `seconds` length.
    pub fn new(config: SimulatorConfig, seconds: u64) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let snake = Snake::new(config.initial_snake.iter().map(|&c| Position::from(c)));
        let state = SimulatorState::spawn(snake, &mut rng);
        Ok(Self::assemble(config, seconds, state, rng))
    }

    /// Prepare a run that starts from a given state instead of the
    /// configured snake. The configured seed still drives fruit placement.
    pub fn from_state(
        config: SimulatorConfig,
        seconds: u64,
        state: SimulatorState,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::assemble(config, seconds, state, rng))
    }

    fn assemble(config: SimulatorConfig, seconds: u64, state: SimulatorState, rng: StdRng) -> Self {
        let frame_budget = config.frame_budget(seconds);
        let writer = SlotWriter::new(config.frames_per_slot, config.max_slots);
        Self {
            config,
            frame_budget,
            state,
            writer,
            rng,
            death_frame: None,
            forced_death: false,
        }
    }

    pub fn frame_budget(&self) -> usize {
        self.frame_budget
    }

    pub fn state(&self) -> &SimulatorState {
        &self.state
    }

    /// Whether the main loop has to stop and leave room for dying and the
    /// footer.
    ///
    /// Compares the index of the last recorded frame (-1 before the first)
    /// with the budget minus the snake length and footer length.
    pub fn budget_reached(&self) -> bool {
        let last_frame = self.writer.frames_written() as i64 - 1;
        let limit = self.frame_budget as i64
            - self.state.snake().len() as i64
            - self.config.footer_frames as i64;
        last_frame >= limit
    }

    fn draw_step(&mut self) -> Result<(), SimulationError> {
        let frame = self.writer.push_frame()?;
        self.state.draw(frame)?;
        Ok(())
    }

    fn logic_step(&mut self) -> StepOutcome {
        let outcome = self.state.step_logic(&mut self.rng);
        if outcome == StepOutcome::Died {
            let frame = self.writer.frames_written().saturating_sub(1);
            log::info!("Snake dies on frame {}", frame);
            self.death_frame = Some(frame);
        }
        outcome
    }

    /// Run to completion.
    pub fn run(self) -> Result<SimulationOutput, SimulationError> {
        self.run_observed(|_| {})
    }

    /// Run to completion, calling `observe` after every logic step.
    pub fn run_observed<F>(mut self, mut observe: F) -> Result<SimulationOutput, SimulationError>
    where
        F: FnMut(&SimulatorState),
    {
        log::info!("Running for {} frames", self.frame_budget);

        while !self.state.is_done() && !self.budget_reached() {
            self.draw_step()?;
            self.logic_step();
            observe(&self.state);
        }

        if !self.state.is_done() {
            // The death has not been drawn yet, so shrink before the first frame.
            if self.state.phase() == Phase::Running {
                self.forced_death = true;
                self.death_frame = Some(self.writer.frames_written());
                log::info!(
                    "Frame budget reached, killing snake of length {}",
                    self.state.snake().len()
                );
            }
            self.state.kill();
            self.logic_step();
            observe(&self.state);

            while !self.state.is_done() {
                self.draw_step()?;
                self.logic_step();
                observe(&self.state);
            }
        }

        append_footer(&mut self.writer, self.config.footer_frames)?;

        let summary = SimulationSummary {
            frame_budget: self.frame_budget,
            frames: self.writer.frames_written(),
            slots: self.writer.slots().len(),
            fruit_eaten: self.state.fruit_eaten(),
            longest_snake: self.state.longest,
            death_frame: self.death_frame,
            forced_death: self.forced_death,
        };
        log::info!("Simulation finished: {}", summary);

        Ok(SimulationOutput {
            slots: self.writer.into_slots(),
            summary,
        })
    }
}
