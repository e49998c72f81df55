use std::path::PathBuf;

/// Library-level structured errors for reassert.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ReassertError {
	#[error("Failed to read source file: {path}")]
	ReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write converted file: {path}")]
	WriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to scan directory: {path}")]
	ScanError {
		path: PathBuf,
		#[source]
		source: walkdir::Error,
	},

	#[error("Invalid file filter: {pattern}")]
	InvalidFilter {
		pattern: String,
		#[source]
		source: glob::PatternError,
	},

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

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

	#[error("Unknown pass name: {name}")]
	UnknownPass { name: String },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using ReassertError.
pub type Result<T> = std::result::Result<T, ReassertError>;
