//! Pixel Strip - 44x11 monochrome animations exported as BMP strips.
//!
//! Animations target a fixed 44x11 on/off display. They are kept as JSON
//! (the editable source) and exported as wide BMP strips where every frame
//! is followed by a 4-pixel gap.
//!
//! # Architecture
//!
//! - `frame`: single frames and bounded frame sequences
//! - `animation`: strip/JSON encoding, image import, on-disk storage
//! - `snake`: self-playing snake that renders itself into frame slots
//! - `editor`: command-driven editing session with change notifications
//! - `schema`: configuration types
//!
//! # Example
//!
//! ```rust,no_run
//! use pixel_strip::{
//!     animation::AnimationStore,
//!     schema::{SimulatorConfig, StorageConfig},
//!     snake::SnakeSimulator,
//! };
//!
//! let simulator = SnakeSimulator::new(SimulatorConfig::default(), 10)?;
//! let output = simulator.run()?;
//! println!("{}", output.summary);
//!
//! let store = AnimationStore::new(StorageConfig::snake());
//! store.save("demo", &output.slots)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod animation;
pub mod editor;
pub mod frame;
pub mod schema;
pub mod snake;

// Re-export commonly used types
pub use animation::{AnimationStore, StripError};
pub use frame::{FrameError, FrameGrid, FrameSequence, ShiftDirection};
pub use schema::{SimulatorConfig, StorageConfig};
pub use snake::{SimulationError, SnakeSimulator};
