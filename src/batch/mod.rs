//! Batch processing for reassert.
//!
//! This module handles:
//! - The per-file pipeline: read once, transform in memory, write back
//!   only when the content changed
//! - Per-file outcome reporting with a continue-on-error policy
//! - Summary counts for the whole batch

pub mod scanner;

pub use scanner::{ScanOptions, collect_candidates};

use crate::diff;
use crate::error::{ReassertError, Result};
use crate::rules::{Pass, apply_passes, needs_conversion};
use std::path::{Path, PathBuf};

/// What happened to a single candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// The file was rewritten, or would be in a dry run.
	Converted,

	/// Trigger markers were present but the rules produced no change.
	Unchanged,

	/// No trigger markers; the file is not a conversion candidate.
	Skipped,
}

/// Options for a batch run.
#[derive(Debug)]
pub struct BatchOptions<'a> {
	/// Passes to apply to each file, in order.
	pub passes: &'a [Pass],

	/// Report changes without writing them.
	pub dry_run: bool,

	/// Print a unified diff per changed file.
	pub show_diff: bool,
}

/// Summary counts for a completed batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
	pub converted: usize,
	pub unchanged: usize,
	pub skipped: usize,
	pub failed: usize,
}

impl BatchSummary {
	/// Render the one-line batch report.
	pub fn report(&self, dry_run: bool) -> String {
		let verb = if dry_run { "Would convert" } else { "Converted" };
		format!(
			"{} {} file(s), {} unchanged, {} skipped, {} failed",
			verb, self.converted, self.unchanged, self.skipped, self.failed
		)
	}
}

/// Process a single candidate file.
///
/// The file is read exactly once, transformed purely in memory, and
/// written back at most once, only when the final buffer differs from
/// the original.
pub fn process_file(path: &Path, options: &BatchOptions) -> Result<Outcome> {
	let original = std::fs::read_to_string(path).map_err(|source| ReassertError::ReadError {
		path: path.to_path_buf(),
		source,
	})?;

	if !needs_conversion(&original) {
		return Ok(Outcome::Skipped);
	}

	let converted = apply_passes(options.passes, &original);
	if converted == original {
		return Ok(Outcome::Unchanged);
	}

	if options.show_diff {
		diff::print_diff(path, &original, &converted);
	}

	if !options.dry_run {
		std::fs::write(path, &converted).map_err(|source| ReassertError::WriteError {
			path: path.to_path_buf(),
			source,
		})?;
	}

	Ok(Outcome::Converted)
}

/// Run the batch over all candidates.
///
/// Individual file failures are reported on stderr and counted; they
/// never abort the rest of the batch. No retries.
pub fn run_batch(candidates: &[PathBuf], options: &BatchOptions) -> BatchSummary {
	let mut summary = BatchSummary::default();

	for path in candidates {
		match process_file(path, options) {
			Ok(Outcome::Converted) => {
				summary.converted += 1;
				if options.dry_run {
					println!("would convert {}", path.display());
				} else {
					println!("converted {}", path.display());
				}
			}
			Ok(Outcome::Unchanged) => {
				summary.unchanged += 1;
				println!("unchanged {}", path.display());
			}
			Ok(Outcome::Skipped) => {
				summary.skipped += 1;
				println!("skipped {} (no TUnit syntax)", path.display());
			}
			Err(error) => {
				summary.failed += 1;
				eprintln!("error {}: {}", path.display(), error);
			}
		}
	}

	summary
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::default_passes;
	use std::fs;

	fn options(passes: &[Pass]) -> BatchOptions<'_> {
		BatchOptions {
			passes,
			dry_run: false,
			show_diff: false,
		}
	}

	#[test]
	fn test_process_file_converts_and_writes() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("WidgetTests.cs");
		fs::write(&path, "await Assert.That(flag).IsTrue();\n").unwrap();

		let passes = default_passes().unwrap();
		let outcome = process_file(&path, &options(&passes)).unwrap();
		assert_eq!(outcome, Outcome::Converted);
		assert_eq!(
			fs::read_to_string(&path).unwrap(),
			"Assert.True(flag);\n"
		);
	}

	#[test]
	fn test_process_file_skips_without_markers() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("Plain.cs");
		let content = "using Xunit;\n\npublic class Plain { }\n";
		fs::write(&path, content).unwrap();

		let passes = default_passes().unwrap();
		let outcome = process_file(&path, &options(&passes)).unwrap();
		assert_eq!(outcome, Outcome::Skipped);
		assert_eq!(fs::read_to_string(&path).unwrap(), content);
	}

	#[test]
	fn test_process_file_reports_unchanged() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("Converted.cs");
		// Mentions TUnit without containing anything rewritable.
		let content = "// migrated off TUnit\nusing Xunit;\n";
		fs::write(&path, content).unwrap();

		let passes = default_passes().unwrap();
		let outcome = process_file(&path, &options(&passes)).unwrap();
		assert_eq!(outcome, Outcome::Unchanged);
		assert_eq!(fs::read_to_string(&path).unwrap(), content);
	}

	#[test]
	fn test_dry_run_does_not_write() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("WidgetTests.cs");
		let content = "await Assert.That(flag).IsTrue();\n";
		fs::write(&path, content).unwrap();

		let passes = default_passes().unwrap();
		let dry = BatchOptions {
			passes: &passes,
			dry_run: true,
			show_diff: false,
		};
		let outcome = process_file(&path, &dry).unwrap();
		assert_eq!(outcome, Outcome::Converted);
		assert_eq!(fs::read_to_string(&path).unwrap(), content);
	}

	#[test]
	fn test_unreadable_file_is_a_read_error() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("Broken.cs");
		fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

		let passes = default_passes().unwrap();
		let result = process_file(&path, &options(&passes));
		assert!(matches!(
			result.unwrap_err(),
			ReassertError::ReadError { .. }
		));
	}

	#[test]
	fn test_run_batch_continues_past_failures() {
		let temp_dir = tempfile::tempdir().unwrap();
		let broken = temp_dir.path().join("ABroken.cs");
		fs::write(&broken, [0xff, 0xfe, 0x00]).unwrap();
		let good = temp_dir.path().join("WidgetTests.cs");
		fs::write(&good, "await Assert.That(flag).IsTrue();\n").unwrap();

		let passes = default_passes().unwrap();
		let summary = run_batch(&[broken, good.clone()], &options(&passes));

		assert_eq!(summary.failed, 1);
		assert_eq!(summary.converted, 1);
		assert_eq!(
			fs::read_to_string(&good).unwrap(),
			"Assert.True(flag);\n"
		);
	}

	#[test]
	fn test_summary_report_wording() {
		let summary = BatchSummary {
			converted: 2,
			unchanged: 1,
			skipped: 3,
			failed: 0,
		};
		assert_eq!(
			summary.report(false),
			"Converted 2 file(s), 1 unchanged, 3 skipped, 0 failed"
		);
		assert!(summary.report(true).starts_with("Would convert"));
	}
}
