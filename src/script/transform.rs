//! The rewrite passes over an updater-script line sequence.
//!
//! This module handles:
//! - Running the mount, unmount, and format passes in a fixed order
//! - Optionally neutralizing device assertions
//!
//! Each pass visits every index once and writes the replacement back at the
//! same index, so the sequence never grows, shrinks, or reorders.

use crate::config::types::{Device, Partition};
use crate::script::matcher;
use crate::script::rewriter::{self, ScriptOp};

/// Rewrite all partition commands in `lines` for multiboot.
///
/// Runs the mount, unmount, and format passes in that order, then the
/// assertion pass when `remove_device_checks` is set. Lines matching no
/// pattern are left byte-for-byte untouched.
pub fn transform_lines(lines: &mut [String], device: &Device, remove_device_checks: bool) {
	replace_mount_lines(lines, device);
	replace_unmount_lines(lines, device);
	replace_format_lines(lines, device);

	if remove_device_checks {
		disable_device_asserts(lines);
	}
}

/// Replace partition mount commands with the helper-binary form.
pub fn replace_mount_lines(lines: &mut [String], device: &Device) {
	for line in lines.iter_mut() {
		if matcher::is_mount_line(line)
			&& let Some(partition) = matcher::partition_target(line, device)
		{
			*line = rewriter::render(ScriptOp::Mount, partition);
		}
	}
}

/// Replace partition unmount commands with the helper-binary form.
pub fn replace_unmount_lines(lines: &mut [String], device: &Device) {
	for line in lines.iter_mut() {
		if matcher::is_unmount_line(line)
			&& let Some(partition) = matcher::partition_target(line, device)
		{
			*line = rewriter::render(ScriptOp::Unmount, partition);
		}
	}
}

/// Replace partition format commands with the helper-binary form.
///
/// Besides `format(...)` calls, three legacy idioms are recognized:
/// `delete_recursive` of /system or /cache, and format.sh helper scripts
/// (which always wipe /data). Only these exact idioms are special-cased.
pub fn replace_format_lines(lines: &mut [String], device: &Device) {
	for line in lines.iter_mut() {
		if matcher::is_format_line(line) {
			if let Some(partition) = matcher::partition_target(line, device) {
				*line = rewriter::render(ScriptOp::Format, partition);
			}
		} else if matcher::is_system_wipe_line(line) {
			*line = rewriter::render(ScriptOp::Format, Partition::System);
		} else if matcher::is_cache_wipe_line(line) {
			*line = rewriter::render(ScriptOp::Format, Partition::Cache);
		} else if matcher::is_format_script_line(line) {
			*line = rewriter::render(ScriptOp::Format, Partition::Data);
		}
	}
}

/// Short-circuit every device model/name assertion to true.
pub fn disable_device_asserts(lines: &mut [String]) {
	for line in lines.iter_mut() {
		if matcher::is_device_assert_line(line) {
			*line = rewriter::disable_device_assert(line);
		}
	}
}
