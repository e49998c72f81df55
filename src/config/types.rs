use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration from a `.reassert.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// Glob applied to candidate file names. Defaults to `*.cs`.
	#[serde(default)]
	pub filter: Option<String>,

	/// Whether to descend into subdirectories.
	#[serde(default)]
	pub recursive: Option<bool>,

	/// File names that are never rewritten.
	#[serde(default)]
	pub exclude: Vec<String>,

	/// Passes to run. Selected passes always run in catalog order.
	/// Defaults to all passes.
	#[serde(default)]
	pub passes: Option<Vec<String>>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

impl Config {
	/// Validate pass names against the built-in catalog.
	pub fn validate(&self) -> Result<(), crate::error::ReassertError> {
		if let Some(ref passes) = self.passes {
			for name in passes {
				if !crate::rules::pass_names().contains(&name.as_str()) {
					return Err(crate::error::ReassertError::UnknownPass {
						name: name.clone(),
					});
				}
			}
		}
		Ok(())
	}
}
