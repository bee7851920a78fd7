use serde::Serialize;

/// Summary of a trained model.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ModelStats {
	pub order: usize,
	/// Tokens seen during training, line-breaks included.
	pub total_words: usize,
	pub unique_words: usize,
	/// Number of distinct contexts in the transition table.
	pub vocabulary_size: usize,
	pub beginning_sequences: usize,
	pub line_endings: usize,
	/// Most frequent words, by count descending then word ascending.
	pub most_common_words: Vec<(String, usize)>,
}
