//! Schema module - Configuration types for simulation and storage.

mod config;

pub use config::*;
