//! Default parameters shared by the model, the generator and the CLI.

/// Token standing for a line boundary in the token stream.
pub const LINE_BREAK_TOKEN: &str = "\n";

pub const DEFAULT_ORDER: usize = 2;
pub const DEFAULT_MIN_WORDS: usize = 3;
pub const DEFAULT_MAX_WORDS: usize = 8;
pub const DEFAULT_LINES: usize = 10;

/// Marks whose preceding whitespace is removed from generated poems.
/// Parentheses get their own rule (see `text::clean_output`).
pub const PUNCTUATION_MARKS: [char; 8] = [',', '.', ';', ':', '!', '?', ')', '('];

pub const TITLE_LENGTH_MIN: usize = 2;
pub const TITLE_LENGTH_MAX: usize = 5;

/// Chance to stop a line on a word known to end lines.
pub const LINE_ENDING_PROBABILITY: f64 = 0.3;

/// Chance to drop a line whose first three words were already used.
pub const REPEAT_DROP_PROBABILITY: f64 = 0.7;

/// Consecutive line-break successors tolerated before a line is cut.
pub const MAX_LINE_BREAK_SKIPS: usize = 64;

/// Number of entries in `ModelStats::most_common_words`.
pub const MOST_COMMON_LIMIT: usize = 20;

pub const TRAINING_EXTENSION: &str = "txt";
pub const DEFAULT_OUTPUT_DIR: &str = "generated_poems";
pub const DEFAULT_MODEL_FILE: &str = "model.json";
