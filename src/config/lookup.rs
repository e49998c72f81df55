use crate::config::parser::parse_config_file;
use crate::config::types::LoadedConfig;
use crate::error::{ReassertError, Result};
use std::path::{Path, PathBuf};

/// Base name of the config file.
pub const CONFIG_FILE_NAME: &str = ".reassert.toml";

/// Resolve the config file for a run.
///
/// Lookup order:
/// 1. An explicit `--config` path, which must parse (missing is an error)
/// 2. `<dir>/.reassert.toml` next to the sources being converted
/// 3. `~/.reassert.toml`
///
/// Returns `None` when no config file exists anywhere; callers fall back
/// to built-in defaults.
pub fn resolve_config(dir: &Path, explicit: Option<&Path>) -> Result<Option<LoadedConfig>> {
	if let Some(path) = explicit {
		let config = parse_config_file(path)?;
		return Ok(Some(LoadedConfig {
			config,
			path: path.to_path_buf(),
		}));
	}

	let local_path = dir.join(CONFIG_FILE_NAME);
	if local_path.exists() {
		let config = parse_config_file(&local_path)?;
		return Ok(Some(LoadedConfig {
			config,
			path: local_path,
		}));
	}

	let user_path = user_config_path()?;
	if user_path.exists() {
		let config = parse_config_file(&user_path)?;
		return Ok(Some(LoadedConfig {
			config,
			path: user_path,
		}));
	}

	Ok(None)
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(ReassertError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
