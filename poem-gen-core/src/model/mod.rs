//! Top-level module for the Markov poetry system.
//!
//! This module provides:
//! - A fixed-order word-level Markov chain (`MarkovModel`)
//! - Successor lists per context (`State`)
//! - Model files in JSON or postcard form (`persistence`)
//! - Poem parameters and styles (`PoemOptions`, `PoemStyle`)
//! - A poem generator walking the chain (`PoemGenerator`)

/// Poem generation on top of a trained `MarkovModel`.
///
/// Titles, lines, style layouts and final formatting.
pub mod generator;

/// Word-level Markov chain of a fixed order.
///
/// Handles training (single text, directory, merge), sampling,
/// statistics and persistence.
pub mod markov_model;

/// Encoding of model files and of context keys.
pub mod persistence;

/// Poem styles and generation options.
pub mod poem_options;

/// Successor list of a single context.
mod state;

/// Model statistics record.
pub mod stats;

pub use generator::PoemGenerator;
pub use markov_model::MarkovModel;
pub use persistence::ModelFormat;
pub use poem_options::{PoemOptions, PoemStyle};
pub use stats::ModelStats;
