use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the model, the generator and the file helpers.
#[derive(Error, Debug)]
pub enum Error {
	/// Generation or statistics were requested before any training.
	#[error("model has not been trained yet")]
	NotTrained,

	#[error("no text files found in directory: {}", .0.display())]
	NoInputFiles(PathBuf),

	#[error("order must be >= 1, got {0}")]
	InvalidOrder(usize),

	#[error("order mismatch: expected {expected}, found {found}")]
	OrderMismatch { expected: usize, found: usize },

	#[error("invalid word bounds: min {min} is greater than max {max}")]
	InvalidWordBounds { min: usize, max: usize },

	#[error("probability must be between 0.0 and 1.0, got {0}")]
	InvalidProbability(f64),

	#[error("unknown poem style: {0} (expected default, haiku, sonnet or free_verse)")]
	UnknownStyle(String),

	/// The model file could be read but its content is not a valid model.
	#[error("corrupt model file: {0}")]
	CorruptModel(String),

	#[error("serialization error: {0}")]
	Serialization(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_offending_value() {
		assert_eq!(Error::InvalidOrder(0).to_string(), "order must be >= 1, got 0");
		assert_eq!(
			Error::InvalidWordBounds { min: 5, max: 2 }.to_string(),
			"invalid word bounds: min 5 is greater than max 2"
		);
		assert!(Error::NoInputFiles(PathBuf::from("corpus")).to_string().ends_with("corpus"));
	}

	#[test]
	fn io_errors_convert() {
		let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
		assert!(matches!(err, Error::Io(_)));
	}
}
