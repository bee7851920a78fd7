//! Tokenization of training text and formatting of generated poems.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{LINE_BREAK_TOKEN, PUNCTUATION_MARKS, REPEAT_DROP_PROBABILITY};
use crate::random::RandomSource;

/// Whitespace before any punctuation mark, closing parenthesis included.
static SPACE_BEFORE_MARK: LazyLock<Regex> = LazyLock::new(|| {
	let marks: String = PUNCTUATION_MARKS
		.iter()
		.filter(|mark| **mark != '(')
		.map(|mark| regex::escape(&mark.to_string()))
		.collect();
	Regex::new(&format!(r"\s+([{marks}])")).expect("punctuation pattern is valid")
});

static SPACE_AFTER_OPEN_PAREN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\(\s+").expect("parenthesis pattern is valid"));

/// Splits raw text into word tokens and line-break tokens.
///
/// - `\r\n` is normalized to `\n`, a lone `\r` is plain whitespace
/// - every line boundary yields exactly one `LINE_BREAK_TOKEN`
/// - words are split on whitespace, punctuation stays attached
///
/// Example: `"the cat,\nsat"` → `["the", "cat,", "\n", "sat"]`
pub fn tokenize(text: &str) -> Vec<&str> {
	let mut tokens = Vec::new();
	let mut lines = text.split("\r\n").flat_map(|chunk| chunk.split('\n'));

	if let Some(first) = lines.next() {
		tokens.extend(first.split_whitespace());
	}
	for line in lines {
		tokens.push(LINE_BREAK_TOKEN);
		tokens.extend(line.split_whitespace());
	}

	tokens
}

/// Tightens punctuation spacing and capitalizes the first letter of each line.
///
/// Whitespace (newlines included) before a punctuation mark or a closing
/// parenthesis is removed, as is whitespace after an opening parenthesis.
/// Empty lines are kept as-is.
pub fn clean_output(text: &str) -> String {
	let text = SPACE_BEFORE_MARK.replace_all(text, "$1");
	let text = SPACE_AFTER_OPEN_PAREN.replace_all(&text, "(");

	text.split(LINE_BREAK_TOKEN)
		.map(capitalize_first)
		.collect::<Vec<_>>()
		.join(LINE_BREAK_TOKEN)
}

/// Drops most lines that repeat the opening three words of an earlier line.
///
/// The comparison is case-insensitive. A repeated line survives with
/// probability `1 - REPEAT_DROP_PROBABILITY`. Blank lines and lines shorter
/// than three words are always kept.
pub fn add_variety<R: RandomSource + ?Sized>(text: &str, rng: &mut R) -> String {
	let mut seen_phrases: HashSet<String> = HashSet::new();
	let mut kept = Vec::new();

	for line in text.split(LINE_BREAK_TOKEN) {
		if line.trim().is_empty() {
			kept.push(line);
			continue;
		}

		let words: Vec<&str> = line.split_whitespace().collect();
		if words.len() >= 3 {
			let phrase = words[..3].join(" ").to_lowercase();
			if seen_phrases.contains(&phrase) && rng.unit() < REPEAT_DROP_PROBABILITY {
				continue;
			}
			seen_phrases.insert(phrase);
		}

		kept.push(line);
	}

	kept.join(LINE_BREAK_TOKEN)
}

/// Upper-cases the first character, leaves the rest untouched.
pub(crate) fn capitalize_first(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Upper-cases the first character and lower-cases the rest.
///
/// `"nIGHT"` → `"Night"`
pub(crate) fn capitalize_word(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}
