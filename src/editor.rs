//! Frame editor session, independent of any particular front end.
//!
//! Front ends parse user input into [`EditCommand`]s, hand them to
//! [`EditorSession::apply`] and redraw from the [`Change`] notifications
//! delivered to every subscribed [`EditorView`].

use std::path::PathBuf;
use std::str::FromStr;

use crate::animation::{AnimationStore, StripError, load_frame_samples};
use crate::frame::{FrameError, FrameSequence, ShiftDirection};

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Toggle { x: usize, y: usize },
    CloneToEnd,
    Clear,
    Create,
    Next,
    Previous,
    Delete,
    Shift(ShiftDirection),
    /// Overwrite the current frame with an image file.
    Import(PathBuf),
    Save,
}

impl FromStr for EditCommand {
    type Err = EditorError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Err(EditorError::UnknownCommand(String::new()));
        };

        let command = match word {
            "t" | "toggle" => {
                let mut coord = || {
                    words
                        .next()
                        .and_then(|w| w.parse::<usize>().ok())
                        .ok_or_else(|| EditorError::BadArguments(line.trim().to_string()))
                };
                let x = coord()?;
                let y = coord()?;
                EditCommand::Toggle { x, y }
            }
            "clone" | "dup" => EditCommand::CloneToEnd,
            "clear" => EditCommand::Clear,
            "create" | "new" => EditCommand::Create,
            "n" | "next" | "++" => EditCommand::Next,
            "p" | "prev" | "--" => EditCommand::Previous,
            "d" | "delete" => EditCommand::Delete,
            "import" => {
                let path = line.trim()[word.len()..].trim();
                if path.is_empty() {
                    return Err(EditorError::BadArguments(line.trim().to_string()));
                }
                EditCommand::Import(PathBuf::from(path))
            }
            "s" | "save" => EditCommand::Save,
            key => match key.chars().collect::<Vec<_>>().as_slice() {
                [c] => EditCommand::Shift(
                    ShiftDirection::from_key(*c)
                        .ok_or_else(|| EditorError::UnknownCommand(key.to_string()))?,
                ),
                _ => return Err(EditorError::UnknownCommand(key.to_string())),
            },
        };
        Ok(command)
    }
}

/// What changed after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A single pixel of the current frame.
    Pixel { x: usize, y: usize, value: bool },
    /// Contents of the current frame.
    Frame,
    /// Frame count or cursor position.
    Sequence,
    /// Animation written to disk.
    Saved(Vec<PathBuf>),
}

/// Receives change notifications from an [`EditorSession`].
pub trait EditorView {
    fn changed(&mut self, sequence: &FrameSequence, change: &Change);
}

/// Errors surfaced by editor commands.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Unknown command: {0:?}")]
    UnknownCommand(String),
    #[error("Bad arguments: {0:?}")]
    BadArguments(String),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Strip(#[from] StripError),
}

/// An open animation plus the views that display it.
pub struct EditorSession {
    base_name: String,
    store: AnimationStore,
    sequence: FrameSequence,
    views: Vec<Box<dyn EditorView>>,
}

impl EditorSession {
    /// Load `base_name` from the store, or start a blank animation.
    pub fn open(store: AnimationStore, base_name: &str) -> Result<Self, StripError> {
        let sequence = match store.load_sequence(base_name)? {
            Some(sequence) => {
                log::info!("Loading {}", base_name);
                sequence
            }
            None => FrameSequence::new(),
        };
        Ok(Self::with_sequence(store, base_name, sequence))
    }

    pub fn with_sequence(store: AnimationStore, base_name: &str, sequence: FrameSequence) -> Self {
        Self {
            base_name: base_name.to_string(),
            store,
            sequence,
            views: Vec::new(),
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }

    /// Register a view; it is drawn once immediately.
    pub fn subscribe(&mut self, mut view: Box<dyn EditorView>) {
        view.changed(&self.sequence, &Change::Sequence);
        self.views.push(view);
    }

    fn notify(&mut self, change: Change) {
        for view in &mut self.views {
            view.changed(&self.sequence, &change);
        }
    }

    /// Execute a command. Returns false when it had no effect (for example
    /// cloning at the frame limit).
    pub fn apply(&mut self, command: EditCommand) -> Result<bool, EditorError> {
        let seq = &mut self.sequence;
        let change = match command {
            EditCommand::Toggle { x, y } => {
                let value = seq.current_frame_mut().toggle(x, y)?;
                Some(Change::Pixel { x, y, value })
            }
            EditCommand::CloneToEnd => seq.clone_current_to_end().then_some(Change::Sequence),
            EditCommand::Clear => {
                seq.clear_current();
                Some(Change::Frame)
            }
            EditCommand::Create => seq.insert_blank_after_current().then_some(Change::Sequence),
            EditCommand::Next => {
                seq.advance();
                Some(Change::Sequence)
            }
            EditCommand::Previous => {
                seq.retreat();
                Some(Change::Sequence)
            }
            EditCommand::Delete => seq.delete_current().then_some(Change::Sequence),
            EditCommand::Shift(direction) => {
                seq.shift(direction);
                Some(Change::Frame)
            }
            EditCommand::Import(path) => {
                let samples = load_frame_samples(&path)?;
                seq.import_into_current(&samples)?;
                Some(Change::Frame)
            }
            EditCommand::Save => {
                let paths = self.store.save_sequence(&self.base_name, &self.sequence)?;
                Some(Change::Saved(paths))
            }
        };

        match change {
            Some(change) => {
                self.notify(change);
                Ok(true)
            }
            None => {
                log::debug!("Command had no effect at {}", self.sequence.counter_label());
                Ok(false)
            }
        }
    }
}
