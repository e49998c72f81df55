//! Line-oriented transforms for reassert.
//!
//! This module handles the steps that cannot be expressed as a single
//! expression pattern:
//! - Inserting `using Xunit;` at the right position in the using block
//! - Removing `async` from test methods whose body never awaits,
//!   which requires brace-balance tracking to find the method body
//! - De-duplicating `using` lines

/// Insert `using Xunit;` if the file declares test attributes but does
/// not import the framework yet.
///
/// The import lands after the last top-level `using` line that precedes
/// the `namespace` declaration, or at the top of the file when there is
/// no using block.
pub fn ensure_xunit_using(content: &str) -> String {
	let has_test_attribute = content.contains("[Test]") || content.contains("[Fact]");
	if !has_test_attribute || content.contains("using Xunit;") {
		return content.to_string();
	}

	let mut lines: Vec<&str> = content.split('\n').collect();
	let mut insert_index = 0;

	for (i, line) in lines.iter().enumerate() {
		if line.starts_with("using ") && !line.starts_with("using Xunit") {
			insert_index = i + 1;
		} else if line.starts_with("namespace ") {
			break;
		}
	}

	lines.insert(insert_index, "using Xunit;");
	lines.join("\n")
}

/// Remove `async` from `public async Task Name()` methods whose body
/// contains no `await`.
///
/// The method body is located by counting `{`/`}` occurrences per line,
/// starting at the signature line and ending where the balance returns
/// to zero. If the body never awaits, the signature becomes
/// `public void Name()`.
pub fn drop_needless_async(content: &str) -> String {
	let mut lines: Vec<String> = content.split('\n').map(|line| line.to_string()).collect();

	for i in 0..lines.len() {
		if !(lines[i].contains("public async Task") && lines[i].contains("()")) {
			continue;
		}

		let method_start = i;
		let mut method_end = method_start;
		let mut brace_count: i64 = 0;
		let mut found_start = false;

		for (j, line) in lines.iter().enumerate().skip(method_start) {
			if line.contains('{') {
				brace_count += line.matches('{').count() as i64;
				found_start = true;
			}
			if line.contains('}') {
				brace_count -= line.matches('}').count() as i64;
			}
			if found_start && brace_count == 0 {
				method_end = j;
				break;
			}
		}

		let body = lines[method_start..=method_end].join("\n");
		if !body.contains("await ") {
			lines[i] = lines[i].replace("public async Task", "public void");
		}
	}

	lines.join("\n")
}

/// Drop repeated `using` lines, keeping the first occurrence of each.
pub fn dedupe_usings(content: &str) -> String {
	let mut seen = std::collections::HashSet::new();
	let filtered: Vec<&str> = content
		.split('\n')
		.filter(|line| {
			if line.starts_with("using ") {
				seen.insert(line.to_string())
			} else {
				true
			}
		})
		.collect();

	filtered.join("\n")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ensure_xunit_using_inserts_after_using_block() {
		let input = "using System;\nusing System.Linq;\n\nnamespace Sample;\n\n[Fact]\n";
		let output = ensure_xunit_using(input);
		assert_eq!(
			output,
			"using System;\nusing System.Linq;\nusing Xunit;\n\nnamespace Sample;\n\n[Fact]\n"
		);
	}

	#[test]
	fn test_ensure_xunit_using_inserts_at_top_without_usings() {
		let input = "namespace Sample;\n\n[Test]\npublic void T() { }\n";
		let output = ensure_xunit_using(input);
		assert!(output.starts_with("using Xunit;\nnamespace Sample;"));
	}

	#[test]
	fn test_ensure_xunit_using_skips_when_present() {
		let input = "using Xunit;\n\n[Fact]\n";
		assert_eq!(ensure_xunit_using(input), input);
	}

	#[test]
	fn test_ensure_xunit_using_skips_without_test_attributes() {
		let input = "using System;\n\nnamespace Sample;\n";
		assert_eq!(ensure_xunit_using(input), input);
	}

	#[test]
	fn test_drop_needless_async_without_await() {
		let input = concat!(
			"public class T\n",
			"{\n",
			"\tpublic async Task Converts_Value()\n",
			"\t{\n",
			"\t\tAssert.Equal(2, Add(1, 1));\n",
			"\t}\n",
			"}\n"
		);
		let output = drop_needless_async(input);
		assert!(output.contains("public void Converts_Value()"));
		assert!(!output.contains("async"));
	}

	#[test]
	fn test_drop_needless_async_keeps_awaiting_methods() {
		let input = concat!(
			"public class T\n",
			"{\n",
			"\tpublic async Task Fetches_Value()\n",
			"\t{\n",
			"\t\tvar value = await client.GetAsync();\n",
			"\t\tAssert.NotNull(value);\n",
			"\t}\n",
			"}\n"
		);
		assert_eq!(drop_needless_async(input), input);
	}

	#[test]
	fn test_drop_needless_async_tracks_nested_braces() {
		// The lambda body closes a brace before the method does; the
		// balance counter must not end the method early.
		let input = concat!(
			"public class T\n",
			"{\n",
			"\tpublic async Task Uses_Lambda()\n",
			"\t{\n",
			"\t\tvar all = items.Where(i => { return i.Ok; });\n",
			"\t\tvar count = await CountAsync(all);\n",
			"\t}\n",
			"}\n"
		);
		assert_eq!(drop_needless_async(input), input);
	}

	#[test]
	fn test_drop_needless_async_handles_multiple_methods() {
		let input = concat!(
			"public class T\n",
			"{\n",
			"\tpublic async Task First()\n",
			"\t{\n",
			"\t\tAssert.True(true);\n",
			"\t}\n",
			"\n",
			"\tpublic async Task Second()\n",
			"\t{\n",
			"\t\tawait Task.Delay(1);\n",
			"\t}\n",
			"}\n"
		);
		let output = drop_needless_async(input);
		assert!(output.contains("public void First()"));
		assert!(output.contains("public async Task Second()"));
	}

	#[test]
	fn test_dedupe_usings_keeps_first_occurrence() {
		let input = "using System;\nusing Xunit;\nusing System;\n\nnamespace Sample;\n";
		assert_eq!(
			dedupe_usings(input),
			"using System;\nusing Xunit;\n\nnamespace Sample;\n"
		);
	}

	#[test]
	fn test_dedupe_usings_leaves_other_lines_alone() {
		let input = "var x = 1;\nvar x = 1;\n";
		assert_eq!(dedupe_usings(input), input);
	}
}
