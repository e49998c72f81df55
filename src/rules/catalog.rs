//! Built-in pass and rule catalog for reassert.
//!
//! Three passes run in order per file:
//! - `convert`: the primary TUnit to xUnit conversion (usings, attributes,
//!   method signatures, the fluent assertion family)
//! - `cleanup`: residual fluent assertions the primary patterns cannot
//!   reach, matched with their nested-call structure spelled out
//! - `lints`: xUnit analyzer-style fixes (argument order, collection
//!   shorthands)
//!
//! Rule order inside a pass matters: later rules consume the output of
//! earlier ones.

use super::scoped;
use super::{Action, Pass, Rule, Step};
use crate::error::{ReassertError, Result};
use regex::Captures;

/// Content markers that identify a file as a conversion candidate.
const TRIGGER_MARKERS: [&str; 3] = ["[Test]", "await Assert.That", "TUnit"];

/// Check whether a buffer contains any conversion trigger markers.
///
/// A file without markers is left untouched and reported as skipped.
pub fn needs_conversion(content: &str) -> bool {
	TRIGGER_MARKERS
		.iter()
		.any(|marker| content.contains(marker))
}

/// Names of the built-in passes, in run order.
pub fn pass_names() -> Vec<&'static str> {
	vec!["convert", "cleanup", "lints"]
}

/// Build the full default pipeline.
pub fn default_passes() -> Result<Vec<Pass>> {
	Ok(vec![convert_pass()?, cleanup_pass()?, lints_pass()?])
}

/// Build a subset of the built-in passes by name.
///
/// Selected passes always run in catalog order, whatever order the names
/// were given in.
pub fn select_passes(names: &[String]) -> Result<Vec<Pass>> {
	for name in names {
		if !pass_names().contains(&name.as_str()) {
			return Err(ReassertError::UnknownPass { name: name.clone() });
		}
	}

	let passes = default_passes()?
		.into_iter()
		.filter(|pass| names.iter().any(|name| name.as_str() == pass.name))
		.collect();
	Ok(passes)
}

fn rule(name: &'static str, pattern: &str, replacement: &'static str) -> Result<Step> {
	Ok(Step::Rule(Rule::new(
		name,
		pattern,
		Action::Template(replacement),
	)?))
}

fn rewrite(name: &'static str, pattern: &str, run: fn(&Captures) -> String) -> Result<Step> {
	Ok(Step::Rule(Rule::new(name, pattern, Action::Rewrite(run))?))
}

fn scoped_step(name: &'static str, run: fn(&str) -> String) -> Step {
	Step::Scoped { name, run }
}

/// The primary TUnit to xUnit conversion.
fn convert_pass() -> Result<Pass> {
	let steps = vec![
		rule("strip-tunit-core-using", r"using TUnit\.Core;?\s*\n", "")?,
		rule(
			"strip-tunit-assertions-using",
			r"using TUnit\.Assertions;?\s*\n",
			"",
		)?,
		rule(
			"strip-tunit-extensions-using",
			r"using TUnit\.Assertions\.Extensions;?\s*\n",
			"",
		)?,
		scoped_step("ensure-xunit-using", scoped::ensure_xunit_using),
		rule("test-attribute", r"\[Test\]", "[Fact]")?,
		rule("test-method-attribute", r"\[TestMethod\]", "[Fact]")?,
		rule(
			"async-void-signature",
			r"public async void (\w+)\(\)",
			"public void $1()",
		)?,
		rule(
			"is-equal-to",
			r"await Assert\.That\(([^)]+)\)\.IsEqualTo\(([^)]+)\);",
			"Assert.Equal($2, $1);",
		)?,
		rule(
			"is-not-equal-to",
			r"await Assert\.That\(([^)]+)\)\.IsNotEqualTo\(([^)]+)\);",
			"Assert.NotEqual($2, $1);",
		)?,
		rule(
			"is-not-null",
			r"await Assert\.That\(([^)]+)\)\.IsNotNull\(\);",
			"Assert.NotNull($1);",
		)?,
		rule(
			"is-null",
			r"await Assert\.That\(([^)]+)\)\.IsNull\(\);",
			"Assert.Null($1);",
		)?,
		rule(
			"is-true",
			r"await Assert\.That\(([^)]+)\)\.IsTrue\(\);",
			"Assert.True($1);",
		)?,
		rule(
			"is-false",
			r"await Assert\.That\(([^)]+)\)\.IsFalse\(\);",
			"Assert.False($1);",
		)?,
		rule(
			"is-greater-than",
			r"await Assert\.That\(([^)]+)\)\.IsGreaterThan\(([^)]+)\);",
			"Assert.True($1 > $2);",
		)?,
		rule(
			"is-greater-or-equal",
			r"await Assert\.That\(([^)]+)\)\.IsGreaterThanOrEqualTo\(([^)]+)\);",
			"Assert.True($1 >= $2);",
		)?,
		rule(
			"is-less-than",
			r"await Assert\.That\(([^)]+)\)\.IsLessThan\(([^)]+)\);",
			"Assert.True($1 < $2);",
		)?,
		rule(
			"is-less-or-equal",
			r"await Assert\.That\(([^)]+)\)\.IsLessThanOrEqualTo\(([^)]+)\);",
			"Assert.True($1 <= $2);",
		)?,
		rule(
			"contains",
			r"await Assert\.That\(([^)]+)\)\.Contains\(([^)]+)\);",
			"Assert.Contains($2, $1);",
		)?,
		rule(
			"does-not-contain",
			r"await Assert\.That\(([^)]+)\)\.DoesNotContain\(([^)]+)\);",
			"Assert.DoesNotContain($2, $1);",
		)?,
		rule(
			"is-empty",
			r"await Assert\.That\(([^)]+)\)\.IsEmpty\(\);",
			"Assert.Empty($1);",
		)?,
		rule(
			"is-not-empty",
			r"await Assert\.That\(([^)]+)\)\.IsNotEmpty\(\);",
			"Assert.NotEmpty($1);",
		)?,
		rule(
			"has-count",
			r"await Assert\.That\(([^)]+)\)\.HasCount\(([^)]+)\);",
			"Assert.Equal($2, $1.Count);",
		)?,
		rule(
			"is-type-of",
			r"await Assert\.That\(([^)]+)\)\.IsTypeOf<([^>]+)>\(\);",
			"Assert.IsType<$2>($1);",
		)?,
		rule(
			"is-assignable-from",
			r"await Assert\.That\(([^)]+)\)\.IsAssignableFrom<([^>]+)>\(\);",
			"Assert.IsAssignableFrom<$2>($1);",
		)?,
		rewrite(
			"residual-assert-that",
			r"await Assert\.That\([^;]+\);",
			rewrite_residual,
		)?,
		scoped_step("drop-needless-async", scoped::drop_needless_async),
		scoped_step("dedupe-usings", scoped::dedupe_usings),
	];

	Ok(Pass {
		name: "convert",
		description: "Convert TUnit usings, attributes, and assertions to xUnit",
		steps,
	})
}

/// Residual fluent assertions left by the primary pass.
fn cleanup_pass() -> Result<Pass> {
	let steps = vec![
		// Await forms whose nested calls defeat the single-expression
		// patterns, with the call structure spelled out.
		rule(
			"property-greater-than",
			r"await Assert\.That\(([^)]+\.GetProperty\([^)]+\)\.GetInt32\(\))\)\.IsGreaterThan\((\d+)\);",
			"Assert.True($1 > $2);",
		)?,
		rule(
			"property-greater-or-equal",
			r"await Assert\.That\(([^)]+\.GetProperty\([^)]+\)\.GetInt32\(\))\)\.IsGreaterThanOrEqualTo\((\d+)\);",
			"Assert.True($1 >= $2);",
		)?,
		rule(
			"property-contains",
			r"await Assert\.That\(([^)]+\.GetProperty\([^)]+\)\.GetString\(\))\)\.Contains\(([^)]+)\);",
			"Assert.Contains($2, $1);",
		)?,
		// Assert.That forms written without await.
		rule(
			"bare-is-equal-to",
			r"Assert\.That\(([^)]+)\)\.IsEqualTo\(([^)]+)\)",
			"Assert.Equal($2, $1)",
		)?,
		rule(
			"bare-is-not-equal-to",
			r"Assert\.That\(([^)]+)\)\.IsNotEqualTo\(([^)]+)\)",
			"Assert.NotEqual($2, $1)",
		)?,
		rule(
			"bare-is-not-null",
			r"Assert\.That\(([^)]+)\)\.IsNotNull\(\)",
			"Assert.NotNull($1)",
		)?,
		rule(
			"bare-is-null",
			r"Assert\.That\(([^)]+)\)\.IsNull\(\)",
			"Assert.Null($1)",
		)?,
		rule(
			"bare-is-true",
			r"Assert\.That\(([^)]+)\)\.IsTrue\(\)",
			"Assert.True($1)",
		)?,
		rule(
			"bare-is-false",
			r"Assert\.That\(([^)]+)\)\.IsFalse\(\)",
			"Assert.False($1)",
		)?,
		rule(
			"bare-contains",
			r"Assert\.That\(([^)]+)\)\.Contains\(([^)]+)\)",
			"Assert.Contains($2, $1)",
		)?,
		rule(
			"bare-is-empty",
			r"Assert\.That\(([^)]+)\)\.IsEmpty\(\)",
			"Assert.Empty($1)",
		)?,
		rule(
			"bare-is-not-empty",
			r"Assert\.That\(([^)]+)\)\.IsNotEmpty\(\)",
			"Assert.NotEmpty($1)",
		)?,
	];

	Ok(Pass {
		name: "cleanup",
		description: "Rewrite residual fluent assertions left by the primary pass",
		steps,
	})
}

/// xUnit analyzer-style fixes.
fn lints_pass() -> Result<Pass> {
	let steps = vec![
		rewrite(
			"equal-string-literal-order",
			r#"Assert\.Equal\(([^,]+), ("[^"]*")\)"#,
			reorder_string_literal,
		)?,
		rewrite(
			"equal-int-literal-order",
			r"Assert\.Equal\(([^,]+), (\d+)\)",
			reorder_int_literal,
		)?,
		rewrite(
			"equal-bool-literal-order",
			r"Assert\.Equal\(([^,]+), (true|false)\)",
			reorder_bool_literal,
		)?,
		rewrite(
			"equal-enum-literal-order",
			r"Assert\.Equal\(([^,]+), (JsonValueKind\.[A-Za-z]+)\)",
			reorder_enum_literal,
		)?,
		rule(
			"true-contains",
			r"Assert\.True\(([^.]+)\.Contains\(([^)]+)\)\)",
			"Assert.Contains($2, $1)",
		)?,
		rule(
			"true-starts-with",
			r"Assert\.True\(([^.]+)\.StartsWith\(([^)]+)\)\)",
			"Assert.StartsWith($2, $1)",
		)?,
		rule(
			"true-ends-with",
			r"Assert\.True\(([^.]+)\.EndsWith\(([^)]+)\)\)",
			"Assert.EndsWith($2, $1)",
		)?,
		rule(
			"equal-zero-count",
			r"Assert\.Equal\(0, ([^)]+)\.Count\);",
			"Assert.Empty($1);",
		)?,
		rule(
			"equal-zero-length",
			r"Assert\.Equal\(0, ([^)]+)\.Length\);",
			"Assert.Empty($1);",
		)?,
		rule(
			"equal-one-count",
			r"Assert\.Equal\(1, ([^)]+)\.Count\);",
			"Assert.Single($1);",
		)?,
	];

	Ok(Pass {
		name: "lints",
		description: "Apply xUnit analyzer-style argument-order and shorthand fixes",
		steps,
	})
}

/// Fallback for `await Assert.That(...);` occurrences the expression
/// patterns could not match, typically because the asserted expression
/// contains nested calls. The fluent suffix decides the rewrite; unknown
/// suffixes are left untouched.
fn rewrite_residual(caps: &Captures) -> String {
	let matched = &caps[0];

	if matched.contains(".IsEqualTo(") {
		matched
			.replace("await Assert.That(", "Assert.Equal(")
			.replace(").IsEqualTo(", ", ")
	} else if matched.contains(".IsNotNull()") {
		matched
			.replace("await Assert.That(", "Assert.NotNull(")
			.replace(").IsNotNull();", ");")
	} else if matched.contains(".IsTrue()") {
		matched
			.replace("await Assert.That(", "Assert.True(")
			.replace(").IsTrue();", ");")
	} else if matched.contains(".IsFalse()") {
		matched
			.replace("await Assert.That(", "Assert.False(")
			.replace(").IsFalse();", ");")
	} else {
		matched.to_string()
	}
}

/// Whether an expression has balanced parentheses.
///
/// The capture groups cut at the first `,`, so an argument list inside
/// the captured expression shows up as an unbalanced prefix. Reordering
/// such a fragment would mangle the call; the reorder rules skip it.
fn is_balanced(expr: &str) -> bool {
	let mut depth: i64 = 0;
	for c in expr.chars() {
		match c {
			'(' => depth += 1,
			')' => depth -= 1,
			_ => {}
		}
		if depth < 0 {
			return false;
		}
	}
	depth == 0
}

fn reorder(caps: &Captures) -> String {
	format!("Assert.Equal({}, {})", &caps[2], &caps[1])
}

fn reorder_string_literal(caps: &Captures) -> String {
	if caps[1].starts_with('"') || !is_balanced(&caps[1]) {
		caps[0].to_string()
	} else {
		reorder(caps)
	}
}

fn reorder_int_literal(caps: &Captures) -> String {
	let actual = &caps[1];
	if actual.chars().all(|c| c.is_ascii_digit()) || !is_balanced(actual) {
		caps[0].to_string()
	} else {
		reorder(caps)
	}
}

fn reorder_bool_literal(caps: &Captures) -> String {
	let actual = &caps[1];
	if actual == "true" || actual == "false" || !is_balanced(actual) {
		caps[0].to_string()
	} else {
		reorder(caps)
	}
}

fn reorder_enum_literal(caps: &Captures) -> String {
	if caps[1].starts_with("JsonValueKind.") || !is_balanced(&caps[1]) {
		caps[0].to_string()
	} else {
		reorder(caps)
	}
}
