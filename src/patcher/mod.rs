//! Autopatcher surface exposed to a host orchestrator.
//!
//! This module handles:
//! - The `AutoPatcher` trait (identity, file manifest, patch entry point)
//! - The standard updater-script patcher

pub mod standard;

pub use standard::{StandardPatcher, UPDATER_SCRIPT};

use crate::error::Result;
use std::path::Path;

/// A patcher that fixes up files inside an extracted installer zip.
pub trait AutoPatcher {
	/// Stable identifier for this patcher.
	fn id(&self) -> &'static str;

	/// Relative paths of files this patcher creates.
	fn new_files(&self) -> Vec<&'static str>;

	/// Relative paths of existing files this patcher modifies.
	fn existing_files(&self) -> Vec<&'static str>;

	/// Patch the files in place under `directory`.
	fn patch_files(&self, directory: &Path) -> Result<()>;
}
