//! Line classification for updater-scripts.
//!
//! This module handles:
//! - Detecting mount, unmount, and format commands in Edify scripts
//! - Detecting device assertion lines
//! - Resolving which partition a command targets

use crate::config::types::{Device, Partition};
use regex::Regex;
use std::sync::LazyLock;

/// Direct `mount(...)` calls.
static MOUNT_CALL_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s*mount\s*\(.*$").unwrap());

/// `run_program` invocations of busybox mount.
static MOUNT_BUSYBOX_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"^\s*run_program\s*\(\s*"[^"]*busybox"\s*,\s*"mount".*$"#).unwrap());

/// `run_program` invocations of a standalone mount helper.
static MOUNT_HELPER_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"^\s*run_program\s*\(\s*"[^",]*/mount".*$"#).unwrap());

/// Direct `unmount(...)` calls.
static UNMOUNT_CALL_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s*unmount\s*\(.*$").unwrap());

/// `run_program` invocations of busybox umount.
static UNMOUNT_BUSYBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"^\s*run_program\s*\(\s*"[^"]*busybox"\s*,\s*"umount".*$"#).unwrap()
});

/// Direct `format(...)` calls.
static FORMAT_CALL_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s*format\s*\(.*$").unwrap());

/// `delete_recursive` wipes of /system.
static SYSTEM_WIPE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"delete_recursive\s*\([^)]*"/system""#).unwrap());

/// `delete_recursive` wipes of /cache.
static CACHE_WIPE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"delete_recursive\s*\([^)]*"/cache""#).unwrap());

/// `run_program` invocations of a format.sh script (wipes /data).
static FORMAT_SCRIPT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"^\s*run_program\s*\(\s*"[^",]*/format.sh".*$"#).unwrap());

/// Assertions on the device model or name.
static DEVICE_ASSERT_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*assert\s*\(.*getprop\s*\(.*(ro.product.device|ro.build.product)").unwrap()
});

/// Check if a line mounts a partition.
pub fn is_mount_line(line: &str) -> bool {
	MOUNT_CALL_RE.is_match(line)
		|| MOUNT_BUSYBOX_RE.is_match(line)
		|| MOUNT_HELPER_RE.is_match(line)
}

/// Check if a line unmounts a partition.
pub fn is_unmount_line(line: &str) -> bool {
	UNMOUNT_CALL_RE.is_match(line) || UNMOUNT_BUSYBOX_RE.is_match(line)
}

/// Check if a line is a direct `format(...)` call.
pub fn is_format_line(line: &str) -> bool {
	FORMAT_CALL_RE.is_match(line)
}

/// Check if a line wipes /system with `delete_recursive`.
pub fn is_system_wipe_line(line: &str) -> bool {
	SYSTEM_WIPE_RE.is_match(line)
}

/// Check if a line wipes /cache with `delete_recursive`.
pub fn is_cache_wipe_line(line: &str) -> bool {
	CACHE_WIPE_RE.is_match(line)
}

/// Check if a line runs a format.sh helper script.
pub fn is_format_script_line(line: &str) -> bool {
	FORMAT_SCRIPT_RE.is_match(line)
}

/// Check if a line asserts on the device model or name.
pub fn is_device_assert_line(line: &str) -> bool {
	DEVICE_ASSERT_RE.is_match(line)
}

/// Names that identify a partition by mount point.
fn literal_names(partition: Partition) -> &'static [&'static str] {
	match partition {
		Partition::System => &["system"],
		Partition::Cache => &["cache"],
		Partition::Data => &["data", "userdata"],
	}
}

/// Resolve which partition a classified line targets.
///
/// Partitions are tried in a fixed order (system, cache, data) and the
/// first hit wins, either by mount-point name or by the device's block
/// device path for that partition. Lines naming no known partition are
/// left alone by the rewrite passes.
pub fn partition_target(line: &str, device: &Device) -> Option<Partition> {
	Partition::ALL.into_iter().find(|&partition| {
		literal_names(partition)
			.iter()
			.any(|name| line.contains(name))
			|| device
				.partition_alias(partition)
				.is_some_and(|alias| line.contains(alias))
	})
}
