//! Substitution rules and passes for reassert.
//!
//! This module handles:
//! - Compiling and applying whole-buffer substitution rules
//! - Line-oriented steps that track scope across lines
//! - Grouping steps into ordered, named passes

pub mod catalog;
pub mod scoped;

pub use catalog::{default_passes, needs_conversion, pass_names, select_passes};

use crate::error::{ReassertError, Result};
use regex::{Captures, Regex};

/// Replacement side of a rule.
#[derive(Debug)]
pub enum Action {
	/// Fixed replacement template with `$n` capture references.
	Template(&'static str),
	/// Computed replacement. Returning the matched text unchanged
	/// leaves that occurrence alone.
	Rewrite(fn(&Captures) -> String),
}

/// A single pattern/replacement transformation applied to file text.
#[derive(Debug)]
pub struct Rule {
	/// Short name shown in catalog listings.
	pub name: &'static str,

	/// Compiled match pattern.
	pattern: Regex,

	/// Replacement to apply at each match.
	action: Action,
}

impl Rule {
	/// Compile a rule from a pattern string and an action.
	pub fn new(name: &'static str, pattern: &str, action: Action) -> Result<Self> {
		let pattern = compile_regex(pattern)?;
		Ok(Rule {
			name,
			pattern,
			action,
		})
	}

	/// Apply this rule to a buffer.
	///
	/// One left-to-right sweep over non-overlapping matches; replacement
	/// output is not rescanned, so a rule runs a single pass rather than
	/// to a fixed point.
	pub fn apply(&self, input: &str) -> String {
		match &self.action {
			Action::Template(replacement) => {
				self.pattern.replace_all(input, *replacement).to_string()
			}
			Action::Rewrite(rewrite) => self
				.pattern
				.replace_all(input, |caps: &Captures| rewrite(caps))
				.to_string(),
		}
	}

	/// The source pattern, for display.
	pub fn pattern_str(&self) -> &str {
		self.pattern.as_str()
	}
}

/// Compile a regex pattern string.
fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| ReassertError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}

/// One step of a pass.
#[derive(Debug)]
pub enum Step {
	/// A whole-buffer substitution rule.
	Rule(Rule),

	/// A line-oriented transform that needs to reason about scope
	/// (brace balance, statement position) rather than a single
	/// expression pattern.
	Scoped {
		name: &'static str,
		run: fn(&str) -> String,
	},
}

impl Step {
	/// Name of this step, for display.
	pub fn name(&self) -> &'static str {
		match self {
			Step::Rule(rule) => rule.name,
			Step::Scoped { name, .. } => name,
		}
	}

	/// Apply this step to a buffer.
	pub fn apply(&self, input: &str) -> String {
		match self {
			Step::Rule(rule) => rule.apply(input),
			Step::Scoped { run, .. } => run(input),
		}
	}
}

/// An ordered group of steps applied to a file buffer.
///
/// Steps run in declaration order; later steps may depend on the output
/// of earlier ones.
#[derive(Debug)]
pub struct Pass {
	/// Name used for selection and display.
	pub name: &'static str,

	/// One-line description shown in `rules list`.
	pub description: &'static str,

	/// The ordered steps of this pass.
	pub steps: Vec<Step>,
}

impl Pass {
	/// Run every step of this pass in order over the buffer.
	pub fn apply(&self, input: &str) -> String {
		let mut buffer = input.to_string();
		for step in &self.steps {
			buffer = step.apply(&buffer);
		}
		buffer
	}
}

/// Apply a sequence of passes to a buffer, in order.
pub fn apply_passes(passes: &[Pass], input: &str) -> String {
	let mut buffer = input.to_string();
	for pass in passes {
		buffer = pass.apply(&buffer);
	}
	buffer
}
