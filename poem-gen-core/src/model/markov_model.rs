use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use log::{debug, info};

use super::persistence::{ModelFile, ModelFormat, decode_key, encode_key};
use super::state::State;
use super::stats::ModelStats;
use crate::config::{LINE_BREAK_TOKEN, MOST_COMMON_LIMIT, TRAINING_EXTENSION};
use crate::error::{Error, Result};
use crate::io;
use crate::random::RandomSource;
use crate::text::tokenize;

/// Word-level Markov chain of a fixed order.
///
/// The model maps every context (a run of `order` consecutive tokens) to the
/// list of tokens observed right after it. Line-breaks are ordinary tokens in
/// the chain, which lets the model remember where lines start and end.
///
/// # Responsibilities
/// - Build the transition table from raw text, cumulatively
/// - Track the contexts that open a line (`beginnings`) and the words that
///   lead into a line-break (`line_endings`)
/// - Count word frequencies for statistics
/// - Sample next words and line openings
/// - Save and restore the chain
///
/// # Invariants
/// - `order >= 1` and never changes after construction (except through `load`)
/// - Every context in `transitions` and `beginnings` holds exactly `order` tokens
/// - Every `State` in `transitions` has at least one successor
/// - Line-breaks are never counted in `word_frequency`
#[derive(Clone, Debug)]
pub struct MarkovModel {
	order: usize,

	/// Context → observed successors, duplicates kept.
	transitions: HashMap<Vec<String>, State>,

	/// Contexts seen at the start of a text or right after a line-break.
	beginnings: Vec<Vec<String>>,

	/// First token of every context followed by a line-break, duplicates kept.
	line_endings: Vec<String>,

	trained: bool,

	word_frequency: HashMap<String, usize>,
	total_words: usize,
}

impl MarkovModel {
	/// Creates an empty model of the given order.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `order == 0`.
	pub fn new(order: usize) -> Result<Self> {
		if order == 0 {
			return Err(Error::InvalidOrder(order));
		}
		Ok(Self {
			order,
			transitions: HashMap::new(),
			beginnings: Vec::new(),
			line_endings: Vec::new(),
			trained: false,
			word_frequency: HashMap::new(),
			total_words: 0,
		})
	}

	/// Restores a model saved with `save`.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let bytes = std::fs::read(&path)?;
		let record = ModelFile::from_bytes(&bytes, ModelFormat::from_path(&path))?;
		let model = Self::from_record(record)?;
		info!(
			"loaded model of order {} ({} contexts) from {}",
			model.order,
			model.transitions.len(),
			path.as_ref().display()
		);
		Ok(model)
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// `true` once `train` has run at least once, or after a `load`.
	pub fn is_trained(&self) -> bool {
		self.trained
	}

	/// Adds a text to the model.
	///
	/// Training is cumulative: the tables are extended, never reset. The end
	/// of a text and the start of the next one are not linked, and they are
	/// not treated as a line-break either.
	pub fn train(&mut self, text: &str) {
		let tokens = tokenize(text);

		for token in tokens.iter().filter(|token| **token != LINE_BREAK_TOKEN) {
			*self.word_frequency.entry((*token).to_owned()).or_insert(0) += 1;
		}
		self.total_words += tokens.len();

		// For each context followed by a successor
		for i in 0..tokens.len().saturating_sub(self.order) {
			let context: Vec<String> = tokens[i..i + self.order].iter().map(|t| (*t).to_owned()).collect();
			let next_word = tokens[i + self.order];

			if i == 0 || tokens[i - 1] == LINE_BREAK_TOKEN {
				self.beginnings.push(context.clone());
			}
			// Recorded against the first token of the context
			if next_word == LINE_BREAK_TOKEN {
				self.line_endings.push(tokens[i].to_owned());
			}

			self.transitions.entry(context).or_default().add_transition(next_word);
		}

		self.trained = true;
		debug!("trained on {} tokens, {} contexts known", tokens.len(), self.transitions.len());
	}

	/// Trains the model on every `.txt` file under `directory_path`.
	///
	/// # Behavior
	/// - Lists the files recursively (sorted paths).
	/// - Splits them into chunks, one per CPU core.
	/// - Each worker thread trains a partial model on its chunk.
	/// - Partial models are merged into `self` in file order, which gives the
	///   same tables as training on each file one after the other.
	///
	/// # Errors
	/// - `NoInputFiles` if the directory is missing or holds no text file.
	/// - `Io` if a file cannot be read. `self` is left untouched in both cases.
	pub fn train_from_directory<P: AsRef<Path>>(&mut self, directory_path: P) -> Result<()> {
		let directory = directory_path.as_ref();
		if !directory.is_dir() {
			return Err(Error::NoInputFiles(directory.to_path_buf()));
		}

		let files = io::list_files(directory, TRAINING_EXTENSION)?;
		if files.is_empty() {
			return Err(Error::NoInputFiles(directory.to_path_buf()));
		}

		let partial_models = self.train_partial_models(files)?;
		for partial_model in &partial_models {
			self.merge(partial_model)?;
		}
		Ok(())
	}

	/// Trains one partial model per chunk of files, on worker threads.
	///
	/// Returns the partial models in chunk order.
	fn train_partial_models(&self, files: Vec<PathBuf>) -> Result<Vec<MarkovModel>> {
		let workers = num_cpus::get().max(1);
		let chunk_size = files.len().div_ceil(workers);
		let chunks: Vec<Vec<PathBuf>> = files.chunks(chunk_size).map(<[PathBuf]>::to_vec).collect();
		let expected = chunks.len();

		let (tx, rx) = mpsc::channel();
		for (index, chunk) in chunks.into_iter().enumerate() {
			let tx = tx.clone();
			let order = self.order;

			thread::spawn(move || {
				let partial_model = Self::train_files(order, &chunk);
				// The receiver outlives every worker
				let _ = tx.send((index, partial_model));
			});
		}
		drop(tx);

		let mut results: Vec<(usize, Result<MarkovModel>)> = rx.iter().collect();
		if results.len() != expected {
			return Err(Error::Io(std::io::Error::other("a training worker stopped unexpectedly")));
		}
		results.sort_by_key(|(index, _)| *index);

		results.into_iter().map(|(_, partial_model)| partial_model).collect()
	}

	fn train_files(order: usize, files: &[PathBuf]) -> Result<MarkovModel> {
		let mut model = MarkovModel::new(order)?;
		for file in files {
			let text = io::read_file(file)?;
			model.train(&text);
			info!("trained on: {}", io::get_filename(file)?);
		}
		Ok(model)
	}

	/// Merges another model of the same order into this one.
	///
	/// Successor lists, beginnings and line-endings of `other` are appended
	/// after ours, and word counts are summed, so merging A then B matches
	/// training on A then B.
	///
	/// # Errors
	/// Returns `OrderMismatch` if the orders differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.order != other.order {
			return Err(Error::OrderMismatch { expected: self.order, found: other.order });
		}

		for (context, state) in &other.transitions {
			if let Some(existing) = self.transitions.get_mut(context) {
				existing.merge(state);
			} else {
				self.transitions.insert(context.clone(), state.clone());
			}
		}
		self.beginnings.extend(other.beginnings.iter().cloned());
		self.line_endings.extend(other.line_endings.iter().cloned());

		for (word, count) in &other.word_frequency {
			*self.word_frequency.entry(word.clone()).or_insert(0) += count;
		}
		self.total_words += other.total_words;
		self.trained |= other.trained;

		Ok(())
	}

	/// Samples the word following `context`.
	///
	/// Returns `None` if the context was never seen.
	pub fn get_next_word<R: RandomSource + ?Sized>(&self, context: &[String], rng: &mut R) -> Option<&str> {
		self.transitions.get(context)?.predict(rng)
	}

	/// Samples a context that opened a line during training.
	///
	/// # Errors
	/// Returns `NotTrained` if no beginning was recorded.
	pub fn get_random_beginning<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<&[String]> {
		if self.beginnings.is_empty() {
			return Err(Error::NotTrained);
		}
		Ok(&self.beginnings[rng.pick(self.beginnings.len())])
	}

	/// `true` if `word` was recorded as a line-ending during training.
	pub fn is_line_ending(&self, word: &str) -> bool {
		self.line_endings.iter().any(|ending| ending == word)
	}

	/// Successors recorded for `context`, in insertion order.
	pub fn successors(&self, context: &[String]) -> Option<&[String]> {
		self.transitions.get(context).map(State::successors)
	}

	/// Every known context, in no particular order.
	pub fn contexts(&self) -> impl Iterator<Item = &[String]> {
		self.transitions.keys().map(Vec::as_slice)
	}

	pub fn beginnings(&self) -> &[Vec<String>] {
		&self.beginnings
	}

	pub fn line_endings(&self) -> &[String] {
		&self.line_endings
	}

	/// Returns statistics about the trained model.
	///
	/// # Errors
	/// Returns `NotTrained` before any training.
	pub fn get_model_stats(&self) -> Result<ModelStats> {
		if !self.trained {
			return Err(Error::NotTrained);
		}

		let mut most_common: Vec<(String, usize)> =
			self.word_frequency.iter().map(|(word, count)| (word.clone(), *count)).collect();
		most_common.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
		most_common.truncate(MOST_COMMON_LIMIT);

		Ok(ModelStats {
			order: self.order,
			total_words: self.total_words,
			unique_words: self.word_frequency.len(),
			vocabulary_size: self.transitions.len(),
			beginning_sequences: self.beginnings.len(),
			line_endings: self.line_endings.len(),
			most_common_words: most_common,
		})
	}

	/// Saves the chain to `path`.
	///
	/// A `.bin` extension selects the postcard encoding, anything else JSON.
	/// Word statistics are not saved.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let bytes = self.to_record().to_bytes(ModelFormat::from_path(&path))?;
		std::fs::write(&path, bytes)?;
		info!("model saved to {}", path.as_ref().display());
		Ok(())
	}

	/// Replaces this model with the one stored at `path`.
	///
	/// The file is fully decoded and checked before any state changes.
	/// Word statistics are reset, since the file does not carry them.
	///
	/// # Errors
	/// - `Io` if the file cannot be read.
	/// - `CorruptModel` if its content is not a valid model.
	pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
		*self = Self::from_file(path)?;
		Ok(())
	}

	/// Resets the model to its empty state, keeping its order.
	pub fn clear(&mut self) {
		self.transitions.clear();
		self.beginnings.clear();
		self.line_endings.clear();
		self.word_frequency.clear();
		self.total_words = 0;
		self.trained = false;
	}

	pub(crate) fn to_record(&self) -> ModelFile {
		ModelFile {
			order: self.order,
			transitions: self
				.transitions
				.iter()
				.map(|(context, state)| (encode_key(context), state.successors().to_vec()))
				.collect(),
			beginnings: self.beginnings.clone(),
			line_endings: self.line_endings.clone(),
		}
	}

	fn from_record(record: ModelFile) -> Result<Self> {
		let mut model = Self::new(record.order)?;
		for (key, successors) in record.transitions {
			if successors.is_empty() {
				return Err(Error::CorruptModel(format!("transition key {key:?} has no successor")));
			}
			model.transitions.insert(decode_key(&key)?, State::from_successors(successors));
		}
		model.beginnings = record.beginnings;
		model.line_endings = record.line_endings;
		model.trained = true;
		Ok(model)
	}
}
