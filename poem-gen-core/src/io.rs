use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a whole UTF-8 text file.
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Writes `contents` to `filename`, creating the parent directory if needed.
pub fn write_file<P: AsRef<Path>>(filename: P, contents: &str) -> io::Result<()> {
	let filename = filename.as_ref();
	if let Some(parent) = filename.parent() {
		if !parent.as_os_str().is_empty() {
			fs::create_dir_all(parent)?;
		}
	}
	File::create(filename)?.write_all(contents.as_bytes())
}

/// Extracts the file name of a path.
///
/// Examples:
/// - `"./data/poems.txt"` → `"poems.txt"`
/// - `"poems.txt"` → `"poems.txt"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let name = input_path
		.as_ref()
		.file_name()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(name.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder<P: AsRef<Path>>(input: P) -> PathBuf {
	let input = input.as_ref();
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Lists all files with a given extension under a directory, recursively.
///
/// Returns full paths, sorted so that repeated runs see the same order.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();
	collect_files(&normalize_folder(dir), extension, &mut files)?;
	files.sort();
	Ok(files)
}

fn collect_files(dir: &Path, extension: &str, files: &mut Vec<PathBuf>) -> io::Result<()> {
	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_dir() {
			collect_files(&path, extension, files)?;
		} else if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			files.push(path);
		}
	}
	Ok(())
}

/// Creates the output directory if it does not exist yet.
pub fn ensure_output_directory<P: AsRef<Path>>(dir: P) -> io::Result<PathBuf> {
	let dir = dir.as_ref();
	fs::create_dir_all(dir)?;
	Ok(dir.to_path_buf())
}

/// Path of the `index`-th generated poem (1-based).
///
/// `poem_path("out", 3)` → `out/poem_3.txt`
pub fn poem_path<P: AsRef<Path>>(dir: P, index: usize) -> PathBuf {
	dir.as_ref().join(format!("poem_{index}.txt"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn list_files_walks_subdirectories() {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir(dir.path().join("nested")).unwrap();
		fs::write(dir.path().join("b.txt"), "b").unwrap();
		fs::write(dir.path().join("nested").join("a.txt"), "a").unwrap();
		fs::write(dir.path().join("notes.md"), "skip").unwrap();

		let files = list_files(dir.path(), "txt").unwrap();
		let names: Vec<String> = files.iter().map(|p| get_filename(p).unwrap()).collect();
		assert_eq!(names.len(), 2);
		assert!(names.contains(&"a.txt".to_owned()));
		assert!(names.contains(&"b.txt".to_owned()));
	}

	#[test]
	fn list_files_on_missing_directory_fails() {
		let dir = tempfile::tempdir().unwrap();
		assert!(list_files(dir.path().join("missing"), "txt").is_err());
	}

	#[test]
	fn write_file_creates_parents() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out").join("poem_1.txt");
		write_file(&path, "Night falls").unwrap();
		assert_eq!(read_file(&path).unwrap(), "Night falls");
	}

	#[test]
	fn poem_paths_are_numbered() {
		assert_eq!(poem_path("generated", 2), Path::new("generated").join("poem_2.txt"));
	}

	#[test]
	fn ensure_output_directory_is_idempotent() {
		let dir = tempfile::tempdir().unwrap();
		let out = dir.path().join("poems");
		ensure_output_directory(&out).unwrap();
		ensure_output_directory(&out).unwrap();
		assert!(out.is_dir());
	}
}
