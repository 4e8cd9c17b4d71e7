//! The standard updater-script patcher.

use crate::config::types::Device;
use crate::error::Result;
use crate::patcher::AutoPatcher;
use crate::script::{read_lines, transform_lines, write_lines};
use std::path::Path;

/// Relative path of the updater-script inside an extracted zip tree.
pub const UPDATER_SCRIPT: &str = "META-INF/com/google/android/updater-script";

/// Rewrites the updater-script's partition commands for multiboot.
///
/// The patch context is fixed at construction: the target device and the
/// precomputed decision whether to strip device assertions (resolved once
/// per run from patch metadata, never per line).
#[derive(Debug, Clone)]
pub struct StandardPatcher {
	device: Device,
	remove_device_checks: bool,
}

impl StandardPatcher {
	pub fn new(device: Device, remove_device_checks: bool) -> Self {
		StandardPatcher {
			device,
			remove_device_checks,
		}
	}
}

impl AutoPatcher for StandardPatcher {
	fn id(&self) -> &'static str {
		"StandardPatcher"
	}

	fn new_files(&self) -> Vec<&'static str> {
		Vec::new()
	}

	fn existing_files(&self) -> Vec<&'static str> {
		vec![UPDATER_SCRIPT]
	}

	/// Load the script, run the rewrite passes, and write it back.
	///
	/// A read failure aborts before anything is written.
	fn patch_files(&self, directory: &Path) -> Result<()> {
		let script_path = directory.join(UPDATER_SCRIPT);

		let mut lines = read_lines(&script_path)?;
		transform_lines(&mut lines, &self.device, self.remove_device_checks);
		write_lines(&script_path, &lines)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::PatchError;
	use std::fs;

	fn hammerhead() -> Device {
		Device {
			id: "hammerhead".to_string(),
			name: Some("LG Nexus 5".to_string()),
			system: Some("/dev/block/platform/msm_sdcc.1/by-name/system".to_string()),
			cache: Some("/dev/block/platform/msm_sdcc.1/by-name/cache".to_string()),
			data: Some("/dev/block/platform/msm_sdcc.1/by-name/userdata".to_string()),
		}
	}

	fn write_script(root: &Path, content: &str) -> std::path::PathBuf {
		let script_path = root.join(UPDATER_SCRIPT);
		fs::create_dir_all(script_path.parent().unwrap()).unwrap();
		fs::write(&script_path, content).unwrap();
		script_path
	}

	#[test]
	fn test_identity_surface() {
		let patcher = StandardPatcher::new(hammerhead(), false);
		assert_eq!(patcher.id(), "StandardPatcher");
		assert!(patcher.new_files().is_empty());
		assert_eq!(patcher.existing_files(), vec![UPDATER_SCRIPT]);
	}

	#[test]
	fn test_patch_files_rewrites_in_place() {
		let dir = tempfile::tempdir().unwrap();
		let script_path = write_script(
			dir.path(),
			concat!(
				"ui_print(\"Installing\");\n",
				"mount(\"ext4\", \"/dev/block/mmcblk0p1\", \"/system\");\n",
				"unmount(\"/cache\");\n",
			),
		);

		let patcher = StandardPatcher::new(hammerhead(), false);
		patcher.patch_files(dir.path()).unwrap();

		let content = fs::read_to_string(&script_path).unwrap();
		assert_eq!(
			content,
			concat!(
				"ui_print(\"Installing\");\n",
				"run_program(\"/update-binary-tool\", \"mount\", \"/system\"};\n",
				"run_program(\"/update-binary-tool\", \"unmount\", \"/cache\"};\n",
			)
		);
	}

	#[test]
	fn test_patch_files_strips_device_checks() {
		let dir = tempfile::tempdir().unwrap();
		let script_path = write_script(
			dir.path(),
			"assert(getprop(\"ro.product.device\") == \"hammerhead\");\n",
		);

		let patcher = StandardPatcher::new(hammerhead(), true);
		patcher.patch_files(dir.path()).unwrap();

		let content = fs::read_to_string(&script_path).unwrap();
		assert_eq!(
			content,
			"assert(\"true\" == \"true\" || getprop(\"ro.product.device\") == \"hammerhead\");\n"
		);
	}

	#[test]
	fn test_patch_files_missing_script_fails() {
		let dir = tempfile::tempdir().unwrap();

		let patcher = StandardPatcher::new(hammerhead(), false);
		let result = patcher.patch_files(dir.path());

		assert!(result.is_err());
		match result.unwrap_err() {
			PatchError::ScriptReadError { path, .. } => {
				assert!(path.ends_with(UPDATER_SCRIPT));
			}
			other => panic!("Expected ScriptReadError, got {other:?}"),
		}
	}
}
