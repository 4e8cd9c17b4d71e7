//! Loading and saving updater-scripts as line sequences.
//!
//! Splitting and joining are exact inverses: the split is on `\n` alone
//! (carriage returns and a trailing empty segment survive as-is), so an
//! untouched script round-trips byte-for-byte.

use crate::error::{PatchError, Result};
use std::path::Path;

/// Split script content into lines on `\n`.
pub fn split_lines(content: &str) -> Vec<String> {
	content.split('\n').map(str::to_string).collect()
}

/// Join lines back into script content.
pub fn join_lines(lines: &[String]) -> String {
	lines.join("\n")
}

/// Read an updater-script into a line sequence.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
	let content = std::fs::read_to_string(path).map_err(|source| PatchError::ScriptReadError {
		path: path.to_path_buf(),
		source,
	})?;
	Ok(split_lines(&content))
}

/// Write a line sequence back to an updater-script in one call.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
	std::fs::write(path, join_lines(lines)).map_err(|source| PatchError::ScriptWriteError {
		path: path.to_path_buf(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_split_join_round_trip() {
		let content = "ui_print(\"a\");\nmount(\"/system\");\n";
		assert_eq!(join_lines(&split_lines(content)), content);
	}

	#[test]
	fn test_trailing_newline_preserved_as_empty_segment() {
		let lines = split_lines("a\nb\n");
		assert_eq!(lines, vec!["a", "b", ""]);
	}

	#[test]
	fn test_no_trailing_newline_round_trip() {
		let content = "a\nb";
		assert_eq!(join_lines(&split_lines(content)), content);
	}

	#[test]
	fn test_crlf_round_trip() {
		let content = "a\r\nb\r\n";
		assert_eq!(join_lines(&split_lines(content)), content);
	}

	#[test]
	fn test_read_write_round_trip() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("updater-script");
		std::fs::write(&path, "mount(\"/system\");\nui_print(\"hi\");\n").unwrap();

		let lines = read_lines(&path).unwrap();
		write_lines(&path, &lines).unwrap();

		let content = std::fs::read_to_string(&path).unwrap();
		assert_eq!(content, "mount(\"/system\");\nui_print(\"hi\");\n");
	}

	#[test]
	fn test_read_missing_file_fails() {
		let result = read_lines(Path::new("/nonexistent/updater-script"));
		assert!(result.is_err());
		match result.unwrap_err() {
			PatchError::ScriptReadError { path, .. } => {
				assert_eq!(path, Path::new("/nonexistent/updater-script"));
			}
			other => panic!("Expected ScriptReadError, got {other:?}"),
		}
	}
}
