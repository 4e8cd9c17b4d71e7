use std::path::PathBuf;

/// Library-level structured errors for otapatch.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid filename pattern in patch rule: {pattern}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Device entry has an empty id")]
	EmptyDeviceId,

	#[error("Duplicate device id: {id}")]
	DuplicateDeviceId { id: String },

	#[error("Patch rule has an empty key")]
	EmptyRuleKey,

	#[error("Unknown device: {id}")]
	UnknownDevice { id: String },

	#[error("Failed to read updater script: {path}")]
	ScriptReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write updater script: {path}")]
	ScriptWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using PatchError.
pub type Result<T> = std::result::Result<T, PatchError>;
