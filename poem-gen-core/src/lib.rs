//! Markov chain poetry generation library.
//!
//! This crate provides a small generative pipeline:
//! - Tokenization of training text with explicit line-breaks
//! - A word-level Markov chain of configurable order, with persistence
//! - A poem generator with titles, styles and output formatting
//! - File helpers used by the command-line front-end
//!
//! Randomness is injected through `RandomSource`, so any `rand::Rng` works
//! and tests can replay exact draws.

/// Default parameters.
pub mod config;

/// Error type shared by the whole crate.
pub mod error;

/// File helpers (corpus listing, reading, poem output).
pub mod io;

/// Markov model and poem generator.
pub mod model;

/// Randomness abstraction.
pub mod random;

/// Tokenizer and poem formatting.
pub mod text;

pub use error::{Error, Result};
pub use model::{MarkovModel, ModelStats, PoemGenerator, PoemOptions, PoemStyle};
pub use random::RandomSource;
