//! Core engine types: configuration, errors, RNG.
//!
//! Everything else in the crate builds on these.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{GameConfig, GenerationMode, SpellingGate};
pub use error::{GameError, Result};
pub use rng::GameRng;
