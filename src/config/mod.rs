//! Configuration loading and parsing for reassert.
//!
//! This module handles:
//! - TOML config file parsing and validation
//! - Config file lookup (explicit path, target directory, user config)
//! - The template written by `--init`

pub mod lookup;
pub mod parser;
pub mod types;

pub use lookup::{CONFIG_FILE_NAME, resolve_config, user_config_path};
pub use parser::{parse_config_file, parse_config_str};
pub use types::{Config, LoadedConfig};

/// File-name filter used when neither the CLI nor the config sets one.
pub const DEFAULT_FILTER: &str = "*.cs";

/// Template written by `--init`.
///
/// The default exclusions are the shared test-infrastructure files that
/// must keep compiling while the suite around them is converted.
pub fn init_template() -> String {
	let template = r#"# Configuration for reassert.
# Looked up as --config PATH, then <DIR>/.reassert.toml, then ~/.reassert.toml.

# Glob applied to candidate file names.
filter = "*.cs"

# Descend into subdirectories.
recursive = false

# File names that are never rewritten.
exclude = [
    "InMemoryAnalysisService.cs",
    "InMemoryProjectGenerator.cs",
    "TestSetup.cs",
]

# Passes to run, always in catalog order. Defaults to all passes.
# passes = ["convert", "cleanup", "lints"]
"#;
	template.to_string()
}
