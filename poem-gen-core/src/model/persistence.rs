//! On-disk representation of a trained model.
//!
//! A model file stores the order, the transition table, the beginnings and
//! the line-endings. Word statistics are not stored.
//!
//! Two encodings share the same record:
//! - `.bin` files use `postcard` (compact, fast to reload)
//! - every other extension uses pretty-printed JSON
//!
//! Contexts are stored as strings: tokens are escaped (`\` → `\\`, `|` → `\|`)
//! and joined with `|`. Decoding is a plain parser, nothing in the file is
//! ever evaluated.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const KEY_SEPARATOR: char = '|';
const KEY_ESCAPE: char = '\\';

/// Serialization format, selected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
	Json,
	Postcard,
}

impl ModelFormat {
	/// `model.bin` → `Postcard`, anything else → `Json`.
	pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
		match path.as_ref().extension().and_then(|ext| ext.to_str()) {
			Some("bin") => ModelFormat::Postcard,
			_ => ModelFormat::Json,
		}
	}
}

/// Persisted model record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModelFile {
	pub order: usize,
	pub transitions: BTreeMap<String, Vec<String>>,
	pub beginnings: Vec<Vec<String>>,
	pub line_endings: Vec<String>,
}

impl ModelFile {
	pub fn to_bytes(&self, format: ModelFormat) -> Result<Vec<u8>> {
		match format {
			ModelFormat::Json => serde_json::to_vec_pretty(self).map_err(|e| Error::Serialization(e.to_string())),
			ModelFormat::Postcard => postcard::to_stdvec(self).map_err(|e| Error::Serialization(e.to_string())),
		}
	}

	/// Parses and validates a record.
	///
	/// # Errors
	/// Returns `CorruptModel` if the bytes do not decode, if `order` is 0,
	/// or if a context does not hold exactly `order` tokens.
	pub fn from_bytes(bytes: &[u8], format: ModelFormat) -> Result<Self> {
		let file: ModelFile = match format {
			ModelFormat::Json => serde_json::from_slice(bytes).map_err(|e| Error::CorruptModel(e.to_string()))?,
			ModelFormat::Postcard => postcard::from_bytes(bytes).map_err(|e| Error::CorruptModel(e.to_string()))?,
		};

		if file.order == 0 {
			return Err(Error::CorruptModel("order must be >= 1".to_owned()));
		}
		for key in file.transitions.keys() {
			let context = decode_key(key)?;
			if context.len() != file.order {
				return Err(Error::CorruptModel(format!(
					"transition key {key:?} has {} tokens, expected {}",
					context.len(),
					file.order
				)));
			}
		}
		if let Some(bad) = file.beginnings.iter().find(|b| b.len() != file.order) {
			return Err(Error::CorruptModel(format!(
				"beginning {bad:?} has {} tokens, expected {}",
				bad.len(),
				file.order
			)));
		}

		Ok(file)
	}
}

/// Encodes a context as a single string key.
///
/// `["a|b", "c"]` → `"a\|b|c"`
pub fn encode_key<S: AsRef<str>>(context: &[S]) -> String {
	let mut key = String::new();
	for (i, token) in context.iter().enumerate() {
		if i > 0 {
			key.push(KEY_SEPARATOR);
		}
		for c in token.as_ref().chars() {
			if c == KEY_SEPARATOR || c == KEY_ESCAPE {
				key.push(KEY_ESCAPE);
			}
			key.push(c);
		}
	}
	key
}

/// Decodes a key produced by `encode_key`.
///
/// # Errors
/// Returns `CorruptModel` on a dangling or unknown escape sequence.
pub fn decode_key(key: &str) -> Result<Vec<String>> {
	let mut tokens = Vec::new();
	let mut current = String::new();
	let mut chars = key.chars();

	while let Some(c) = chars.next() {
		match c {
			KEY_ESCAPE => match chars.next() {
				Some(escaped @ (KEY_SEPARATOR | KEY_ESCAPE)) => current.push(escaped),
				Some(other) => {
					return Err(Error::CorruptModel(format!("unknown escape \\{other} in key {key:?}")));
				}
				None => return Err(Error::CorruptModel(format!("dangling escape in key {key:?}"))),
			},
			KEY_SEPARATOR => tokens.push(std::mem::take(&mut current)),
			_ => current.push(c),
		}
	}
	tokens.push(current);

	Ok(tokens)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn sample() -> ModelFile {
		let mut transitions = BTreeMap::new();
		transitions.insert(encode_key(&["the", "cat"]), vec!["sat".to_owned(), "\n".to_owned(), "sat".to_owned()]);
		transitions.insert(encode_key(&["cat", "\n"]), vec!["the".to_owned()]);
		ModelFile {
			order: 2,
			transitions,
			beginnings: vec![vec!["the".to_owned(), "cat".to_owned()]],
			line_endings: vec!["cat".to_owned()],
		}
	}

	#[test]
	fn format_follows_extension() {
		assert_eq!(ModelFormat::from_path("model.bin"), ModelFormat::Postcard);
		assert_eq!(ModelFormat::from_path("model.json"), ModelFormat::Json);
		assert_eq!(ModelFormat::from_path("model"), ModelFormat::Json);
	}

	#[test]
	fn keys_escape_separators() {
		assert_eq!(encode_key(&["a|b", "c"]), r"a\|b|c");
		assert_eq!(encode_key(&[r"back\slash"]), r"back\\slash");
		assert_eq!(decode_key(r"a\|b|c").unwrap(), vec!["a|b", "c"]);
	}

	#[test]
	fn decode_rejects_bad_escapes() {
		assert!(matches!(decode_key(r"abc\"), Err(Error::CorruptModel(_))));
		assert!(matches!(decode_key(r"a\nb"), Err(Error::CorruptModel(_))));
	}

	#[test]
	fn json_and_postcard_round_trip() {
		let file = sample();
		for format in [ModelFormat::Json, ModelFormat::Postcard] {
			let bytes = file.to_bytes(format).unwrap();
			assert_eq!(ModelFile::from_bytes(&bytes, format).unwrap(), file);
		}
	}

	#[test]
	fn json_layout_uses_string_keys() {
		let bytes = sample().to_bytes(ModelFormat::Json).unwrap();
		let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
		assert_eq!(value["order"], 2);
		assert_eq!(value["transitions"]["the|cat"][1], "\n");
		assert_eq!(value["beginnings"][0][1], "cat");
		assert_eq!(value["line_endings"][0], "cat");
	}

	#[test]
	fn wrong_key_length_is_corrupt() {
		let mut file = sample();
		file.transitions.insert("lonely".to_owned(), vec!["x".to_owned()]);
		let bytes = file.to_bytes(ModelFormat::Json).unwrap();
		assert!(matches!(ModelFile::from_bytes(&bytes, ModelFormat::Json), Err(Error::CorruptModel(_))));
	}

	#[test]
	fn wrong_field_types_are_corrupt() {
		let bytes = br#"{"order": "two", "transitions": {}, "beginnings": [], "line_endings": []}"#;
		assert!(matches!(ModelFile::from_bytes(bytes, ModelFormat::Json), Err(Error::CorruptModel(_))));
		assert!(matches!(ModelFile::from_bytes(b"not json", ModelFormat::Json), Err(Error::CorruptModel(_))));
	}

	#[test]
	fn zero_order_is_corrupt() {
		let bytes = br#"{"order": 0, "transitions": {}, "beginnings": [], "line_endings": []}"#;
		assert!(matches!(ModelFile::from_bytes(bytes, ModelFormat::Json), Err(Error::CorruptModel(_))));
	}

	proptest! {
		#[test]
		fn keys_decode_to_their_context(context in prop::collection::vec(r"[a-z|\\.,\n]{1,6}", 1..5)) {
			let key = encode_key(&context);
			prop_assert_eq!(decode_key(&key).unwrap(), context);
		}
	}
}
