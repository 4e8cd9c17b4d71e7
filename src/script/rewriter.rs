//! Rendering multiboot-safe replacement commands.
//!
//! This module handles:
//! - The `run_program("/update-binary-tool", ...)` replacement templates
//! - Neutralizing device assertions in place

use crate::config::types::Partition;
use regex::Regex;
use std::sync::LazyLock;

/// The helper binary invoked in place of direct partition commands.
pub const UPDATE_BINARY_TOOL: &str = "/update-binary-tool";

/// Partition operations the helper binary understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOp {
	Mount,
	Unmount,
	Format,
}

impl ScriptOp {
	/// The verb passed to the helper binary.
	pub fn verb(self) -> &'static str {
		match self {
			ScriptOp::Mount => "mount",
			ScriptOp::Unmount => "unmount",
			ScriptOp::Format => "format",
		}
	}
}

/// Render the replacement command for an operation on a partition.
pub fn render(op: ScriptOp, partition: Partition) -> String {
	// Not a typo. The terminator must stay `"};` byte-for-byte.
	format!(
		r#"run_program("{}", "{}", "{}"}};"#,
		UPDATE_BINARY_TOOL,
		op.verb(),
		partition.root_path()
	)
}

/// Matches the opening of an `assert(` so a short-circuit can be injected.
static ASSERT_PREFIX_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(\s*assert\s*\()").unwrap());

/// Neutralize a device assertion by short-circuiting it to true.
///
/// Lines that do not open with `assert(` come back unchanged.
pub fn disable_device_assert(line: &str) -> String {
	ASSERT_PREFIX_RE
		.replace(line, r#"${1}"true" == "true" || "#)
		.into_owned()
}
