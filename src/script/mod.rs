//! Updater-script line classification and rewriting.
//!
//! This module handles:
//! - Loading and saving the script as a line sequence
//! - Classifying lines by operation and target partition
//! - Rewriting matched lines into multiboot-safe commands

pub mod io;
pub mod matcher;
pub mod rewriter;
pub mod transform;

pub use io::{join_lines, read_lines, split_lines, write_lines};
pub use matcher::{
	is_cache_wipe_line, is_device_assert_line, is_format_line, is_format_script_line,
	is_mount_line, is_system_wipe_line, is_unmount_line, partition_target,
};
pub use rewriter::{disable_device_assert, render, ScriptOp, UPDATE_BINARY_TOOL};
pub use transform::{
	disable_device_asserts, replace_format_lines, replace_mount_lines, replace_unmount_lines,
	transform_lines,
};
