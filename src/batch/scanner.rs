use crate::error::{ReassertError, Result};
use glob::Pattern;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options controlling candidate discovery.
#[derive(Debug)]
pub struct ScanOptions {
	/// Glob applied to candidate file names.
	pub filter: Pattern,

	/// Base names that are never processed.
	pub excludes: HashSet<String>,

	/// Whether to descend into subdirectories.
	pub recursive: bool,
}

impl ScanOptions {
	/// Build scan options, compiling the file-name filter.
	pub fn new(
		filter: &str,
		excludes: impl IntoIterator<Item = String>,
		recursive: bool,
	) -> Result<Self> {
		let filter = Pattern::new(filter).map_err(|source| ReassertError::InvalidFilter {
			pattern: filter.to_string(),
			source,
		})?;

		Ok(ScanOptions {
			filter,
			excludes: excludes.into_iter().collect(),
			recursive,
		})
	}
}

/// Collect candidate files under `dir`.
///
/// A candidate is a regular file whose base name matches the filter and
/// is not in the exclusion set. Results are sorted by file name so runs
/// produce stable output; processing order is otherwise irrelevant.
pub fn collect_candidates(dir: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>> {
	let max_depth = if options.recursive { usize::MAX } else { 1 };

	let mut candidates = Vec::new();
	for entry in WalkDir::new(dir)
		.min_depth(1)
		.max_depth(max_depth)
		.sort_by_file_name()
	{
		let entry = entry.map_err(|source| ReassertError::ScanError {
			path: dir.to_path_buf(),
			source,
		})?;

		if !entry.file_type().is_file() {
			continue;
		}

		let name = entry.file_name().to_string_lossy();
		if !options.filter.matches(&name) || options.excludes.contains(name.as_ref()) {
			continue;
		}

		candidates.push(entry.into_path());
	}

	Ok(candidates)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	fn scan(dir: &Path, filter: &str, excludes: &[&str], recursive: bool) -> Vec<PathBuf> {
		let options = ScanOptions::new(
			filter,
			excludes.iter().map(|name| name.to_string()),
			recursive,
		)
		.unwrap();
		collect_candidates(dir, &options).unwrap()
	}

	#[test]
	fn test_invalid_filter_pattern() {
		let result = ScanOptions::new("[", std::iter::empty(), false);
		assert!(result.is_err());
		match result.unwrap_err() {
			ReassertError::InvalidFilter { pattern, .. } => assert_eq!(pattern, "["),
			_ => panic!("Expected InvalidFilter error"),
		}
	}

	#[test]
	fn test_collects_matching_files_sorted() {
		let temp_dir = tempfile::tempdir().unwrap();
		fs::write(temp_dir.path().join("BTests.cs"), "").unwrap();
		fs::write(temp_dir.path().join("ATests.cs"), "").unwrap();
		fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

		let candidates = scan(temp_dir.path(), "*.cs", &[], false);
		let names: Vec<_> = candidates
			.iter()
			.map(|path| path.file_name().unwrap().to_string_lossy().to_string())
			.collect();
		assert_eq!(names, vec!["ATests.cs", "BTests.cs"]);
	}

	#[test]
	fn test_exclusion_set_drops_names() {
		let temp_dir = tempfile::tempdir().unwrap();
		fs::write(temp_dir.path().join("WidgetTests.cs"), "").unwrap();
		fs::write(temp_dir.path().join("TestSetup.cs"), "").unwrap();

		let candidates = scan(temp_dir.path(), "*.cs", &["TestSetup.cs"], false);
		assert_eq!(candidates.len(), 1);
		assert!(candidates[0].ends_with("WidgetTests.cs"));
	}

	#[test]
	fn test_top_level_scan_ignores_subdirectories() {
		let temp_dir = tempfile::tempdir().unwrap();
		fs::write(temp_dir.path().join("Top.cs"), "").unwrap();
		fs::create_dir(temp_dir.path().join("nested")).unwrap();
		fs::write(temp_dir.path().join("nested").join("Deep.cs"), "").unwrap();

		let candidates = scan(temp_dir.path(), "*.cs", &[], false);
		assert_eq!(candidates.len(), 1);
		assert!(candidates[0].ends_with("Top.cs"));
	}

	#[test]
	fn test_recursive_scan_descends() {
		let temp_dir = tempfile::tempdir().unwrap();
		fs::write(temp_dir.path().join("Top.cs"), "").unwrap();
		fs::create_dir(temp_dir.path().join("nested")).unwrap();
		fs::write(temp_dir.path().join("nested").join("Deep.cs"), "").unwrap();

		let candidates = scan(temp_dir.path(), "*.cs", &[], true);
		assert_eq!(candidates.len(), 2);
	}

	#[test]
	fn test_missing_directory_is_an_error() {
		let temp_dir = tempfile::tempdir().unwrap();
		let missing = temp_dir.path().join("absent");

		let options = ScanOptions::new("*.cs", std::iter::empty(), false).unwrap();
		let result = collect_candidates(&missing, &options);
		assert!(matches!(
			result.unwrap_err(),
			ReassertError::ScanError { .. }
		));
	}
}
