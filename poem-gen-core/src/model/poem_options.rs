use std::fmt;
use std::str::FromStr;

use crate::config::{DEFAULT_LINES, DEFAULT_MAX_WORDS, DEFAULT_MIN_WORDS};
use crate::error::Error;

/// Layout policy for the body of a poem.
///
/// # Variants
/// - `Default`: `lines` lines of `min_words..=max_words` words, empty lines dropped.
/// - `Haiku`: three lines of 2-3, 3-4 and 2-3 words.
/// - `Sonnet`: fourteen lines of 8-12 words.
/// - `FreeVerse`: `lines` lines mixing short, medium and long bands.
///
/// Fixed-shape styles ignore the `lines`, `min_words` and `max_words` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoemStyle {
	#[default]
	Default,
	Haiku,
	Sonnet,
	FreeVerse,
}

impl PoemStyle {
	pub fn as_str(&self) -> &'static str {
		match self {
			PoemStyle::Default => "default",
			PoemStyle::Haiku => "haiku",
			PoemStyle::Sonnet => "sonnet",
			PoemStyle::FreeVerse => "free_verse",
		}
	}
}

impl fmt::Display for PoemStyle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for PoemStyle {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"default" => Ok(PoemStyle::Default),
			"haiku" => Ok(PoemStyle::Haiku),
			"sonnet" => Ok(PoemStyle::Sonnet),
			"free_verse" => Ok(PoemStyle::FreeVerse),
			other => Err(Error::UnknownStyle(other.to_owned())),
		}
	}
}

/// Parameters of one `generate_poem` call.
///
/// Word bounds are checked when lines are generated: `min_words > max_words`
/// fails with `InvalidWordBounds`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemOptions {
	/// Number of body lines (`Default` and `FreeVerse` only).
	pub lines: usize,

	pub min_words: usize,

	pub max_words: usize,

	/// Prepend a title and a blank line.
	pub include_title: bool,

	pub style: PoemStyle,
}

impl Default for PoemOptions {
	fn default() -> Self {
		Self {
			lines: DEFAULT_LINES,
			min_words: DEFAULT_MIN_WORDS,
			max_words: DEFAULT_MAX_WORDS,
			include_title: true,
			style: PoemStyle::Default,
		}
	}
}

impl PoemOptions {
	/// Default options with another style.
	pub fn with_style(style: PoemStyle) -> Self {
		Self { style, ..Self::default() }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn styles_parse_and_display() {
		for style in [PoemStyle::Default, PoemStyle::Haiku, PoemStyle::Sonnet, PoemStyle::FreeVerse] {
			assert_eq!(style.to_string().parse::<PoemStyle>().unwrap(), style);
		}
		assert_eq!("free_verse".parse::<PoemStyle>().unwrap(), PoemStyle::FreeVerse);
	}

	#[test]
	fn unknown_style_is_an_error() {
		assert!(matches!("limerick".parse::<PoemStyle>(), Err(Error::UnknownStyle(s)) if s == "limerick"));
	}

	#[test]
	fn defaults_match_configuration() {
		let options = PoemOptions::default();
		assert_eq!(options.lines, 10);
		assert_eq!(options.min_words, 3);
		assert_eq!(options.max_words, 8);
		assert!(options.include_title);
		assert_eq!(PoemOptions::with_style(PoemStyle::Haiku).style, PoemStyle::Haiku);
	}
}
