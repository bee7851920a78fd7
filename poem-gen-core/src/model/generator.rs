use std::path::Path;

use log::debug;

use super::markov_model::MarkovModel;
use super::poem_options::{PoemOptions, PoemStyle};
use crate::config::{LINE_BREAK_TOKEN, LINE_ENDING_PROBABILITY, MAX_LINE_BREAK_SKIPS, TITLE_LENGTH_MAX, TITLE_LENGTH_MIN};
use crate::error::{Error, Result};
use crate::io;
use crate::random::RandomSource;
use crate::text::{add_variety, capitalize_word, clean_output};

/// Word bounds of the three haiku lines.
const HAIKU_BOUNDS: [(usize, usize); 3] = [(2, 3), (3, 4), (2, 3)];

const SONNET_LINES: usize = 14;
const SONNET_BOUNDS: (usize, usize) = (8, 12);

const FREE_VERSE_SHORT: (usize, usize) = (1, 3);
const FREE_VERSE_MEDIUM: (usize, usize) = (4, 7);
const FREE_VERSE_LONG: (usize, usize) = (8, 12);

/// Walks a `MarkovModel` to write titles, lines and whole poems.
///
/// # Responsibilities
/// - Sample titles and lines from the chain under length constraints
/// - Apply the layout of a `PoemStyle`
/// - Format the result (punctuation, capitals, repeated openings)
///
/// The generator borrows its model, so the model cannot be trained while a
/// generator is alive. Apart from the random source, no state is kept from
/// one call to the next.
pub struct PoemGenerator<'a, R: RandomSource> {
	model: &'a MarkovModel,
	rng: R,
	line_ending_probability: f64,
}

impl<'a, R: RandomSource> PoemGenerator<'a, R> {
	pub fn new(model: &'a MarkovModel, rng: R) -> Self {
		Self { model, rng, line_ending_probability: LINE_ENDING_PROBABILITY }
	}

	/// Swaps the model used by the next calls.
	pub fn set_model(&mut self, model: &'a MarkovModel) {
		self.model = model;
	}

	pub fn model(&self) -> &'a MarkovModel {
		self.model
	}

	pub fn line_ending_probability(&self) -> f64 {
		self.line_ending_probability
	}

	/// Sets the chance to stop a line on a known line-ending word (0.0..=1.0).
	///
	/// # Errors
	/// Returns `InvalidProbability` if the value is outside the valid range.
	pub fn set_line_ending_probability(&mut self, probability: f64) -> Result<()> {
		if !(0.0..=1.0).contains(&probability) {
			return Err(Error::InvalidProbability(probability));
		}
		self.line_ending_probability = probability;
		Ok(())
	}

	fn ensure_trained(&self) -> Result<()> {
		if !self.model.is_trained() {
			return Err(Error::NotTrained);
		}
		Ok(())
	}

	/// Generates a title of a few capitalized words.
	///
	/// # Behavior
	/// - Draws a length in `TITLE_LENGTH_MIN..=TITLE_LENGTH_MAX`.
	/// - Keeps only the first token of a random beginning.
	/// - Spends the remaining `length - 1` steps asking for next words. A
	///   line-break is not added to the title, but the context still moves past
	///   it. An unknown context ends the title.
	///
	/// # Errors
	/// Returns `NotTrained` if the model cannot provide a beginning.
	pub fn generate_title(&mut self) -> Result<String> {
		self.ensure_trained()?;
		let model = self.model;

		let title_length = self.rng.between(TITLE_LENGTH_MIN, TITLE_LENGTH_MAX);
		let mut current = model.get_random_beginning(&mut self.rng)?.to_vec();
		let mut title_words: Vec<String> = current[..1].to_vec();

		for _ in 1..title_length {
			let Some(next_word) = model.get_next_word(&current, &mut self.rng) else {
				break;
			};
			if next_word != LINE_BREAK_TOKEN {
				title_words.push(next_word.to_owned());
			}
			slide(&mut current, next_word);
		}

		let title = title_words.join(" ");
		Ok(title.split_whitespace().map(capitalize_word).collect::<Vec<_>>().join(" "))
	}

	/// Generates one line of `min_words..=max_words` words.
	///
	/// # Behavior
	/// - All tokens of a random beginning open the line and count as words,
	///   so an order above `max_words` yields lines longer than `max_words`.
	/// - Line-break successors move the context without adding a word.
	/// - Once `min_words` is reached, each word known to end lines stops the
	///   line with probability `line_ending_probability`.
	/// - An unknown context stops the line early; the short line is kept.
	///
	/// # Errors
	/// - `NotTrained` if the model cannot provide a beginning.
	/// - `InvalidWordBounds` if `min_words > max_words`.
	pub fn generate_line(&mut self, min_words: usize, max_words: usize) -> Result<String> {
		self.ensure_trained()?;
		if min_words > max_words {
			return Err(Error::InvalidWordBounds { min: min_words, max: max_words });
		}
		let model = self.model;

		let mut current = model.get_random_beginning(&mut self.rng)?.to_vec();
		let mut line_words = current.clone();
		let mut word_count = current.len();
		let target_length = self.rng.between(min_words, max_words);
		let mut line_break_skips = 0;

		while word_count < target_length {
			let Some(next_word) = model.get_next_word(&current, &mut self.rng) else {
				break;
			};
			slide(&mut current, next_word);

			if next_word == LINE_BREAK_TOKEN {
				line_break_skips += 1;
				if line_break_skips > MAX_LINE_BREAK_SKIPS {
					debug!("line cut after {line_break_skips} consecutive line-breaks");
					break;
				}
				continue;
			}
			line_break_skips = 0;

			line_words.push(next_word.to_owned());
			word_count += 1;

			if word_count >= min_words
				&& model.is_line_ending(next_word)
				&& self.rng.unit() < self.line_ending_probability
			{
				break;
			}
		}

		let line = line_words.join(" ").replace(&format!(" {LINE_BREAK_TOKEN}"), "");
		Ok(line.trim().to_owned())
	}

	/// Generates the body lines of a poem, before formatting.
	///
	/// See `PoemStyle` for the layout of each style. Only `Default` drops
	/// empty lines.
	pub fn generate_body(&mut self, options: &PoemOptions) -> Result<Vec<String>> {
		self.ensure_trained()?;

		match options.style {
			PoemStyle::Default => {
				let mut lines = Vec::with_capacity(options.lines);
				for _ in 0..options.lines {
					let line = self.generate_line(options.min_words, options.max_words)?;
					if !line.is_empty() {
						lines.push(line);
					}
				}
				Ok(lines)
			}
			PoemStyle::Haiku => HAIKU_BOUNDS.iter().map(|(min, max)| self.generate_line(*min, *max)).collect(),
			PoemStyle::Sonnet => (0..SONNET_LINES).map(|_| self.generate_line(SONNET_BOUNDS.0, SONNET_BOUNDS.1)).collect(),
			PoemStyle::FreeVerse => (0..options.lines)
				.map(|_| {
					let (min, max) = self.free_verse_band();
					self.generate_line(min, max)
				})
				.collect(),
		}
	}

	/// Draws the word bounds of a free verse line.
	///
	/// Two separate draws: below 0.3 gives a short line, otherwise a fresh
	/// draw below 0.7 gives a medium line, else a long one.
	fn free_verse_band(&mut self) -> (usize, usize) {
		if self.rng.unit() < 0.3 {
			FREE_VERSE_SHORT
		} else if self.rng.unit() < 0.7 {
			FREE_VERSE_MEDIUM
		} else {
			FREE_VERSE_LONG
		}
	}

	/// Generates a complete, formatted poem.
	///
	/// The optional title is followed by a blank line, then the body lines.
	/// Punctuation spacing and capitals are fixed, then most lines repeating
	/// an earlier three-word opening are dropped.
	///
	/// # Errors
	/// Returns `NotTrained` on an untrained model and `InvalidWordBounds` on
	/// inconsistent options.
	pub fn generate_poem(&mut self, options: &PoemOptions) -> Result<String> {
		self.ensure_trained()?;

		let mut poem_lines = Vec::new();
		if options.include_title {
			poem_lines.push(self.generate_title()?);
			poem_lines.push(String::new());
		}
		poem_lines.extend(self.generate_body(options)?);

		let poem = clean_output(&poem_lines.join(LINE_BREAK_TOKEN));
		let poem = add_variety(&poem, &mut self.rng);
		debug!("generated {} poem of {} lines", options.style, poem.lines().count());

		Ok(poem)
	}

	/// Generates a poem and writes it to `path`, creating parent directories.
	///
	/// Returns the poem as written.
	pub fn save_poem<P: AsRef<Path>>(&mut self, path: P, options: &PoemOptions) -> Result<String> {
		let poem = self.generate_poem(options)?;
		io::write_file(path, &poem)?;
		Ok(poem)
	}
}

/// Shifts the context window by one token.
fn slide(context: &mut Vec<String>, next_word: &str) {
	context.remove(0);
	context.push(next_word.to_owned());
}
