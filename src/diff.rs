//! Unified diff rendering for dry runs and `--diff`.

use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::path::Path;

/// Print a colored unified diff between the original and converted
/// content of a file.
pub fn print_diff(path: &Path, original: &str, converted: &str) {
	println!("{}", format!("--- {} (original)", path.display()).dimmed());
	println!("{}", format!("+++ {} (converted)", path.display()).dimmed());

	let diff = TextDiff::from_lines(original, converted);
	for change in diff.iter_all_changes() {
		let line = match change.tag() {
			ChangeTag::Delete => format!("-{}", change).red(),
			ChangeTag::Insert => format!("+{}", change).green(),
			ChangeTag::Equal => format!(" {}", change).normal(),
		};
		print!("{}", line);
	}
}
