use crate::config::parser::parse_config_file;
use crate::config::types::{
	ConfigSource, Device, DeviceWithSource, LoadedConfig, MergedConfig, PatchRuleWithSource,
};
use crate::error::{PatchError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Config filename looked for next to the invocation and in the home directory.
pub const CONFIG_FILE_NAME: &str = ".otapatch.toml";

/// Fallback metadata key when no rule matches a filename.
pub const DEFAULT_RULE_KEY: &str = "default";

/// Discover and load all config files.
///
/// An explicit path replaces the whole discovery cascade; otherwise the
/// cascade is `start_dir/.otapatch.toml` followed by `~/.otapatch.toml`,
/// most specific first.
pub fn discover_configs(explicit: Option<&Path>, start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	if let Some(path) = explicit {
		if !path.exists() {
			return Err(PatchError::ConfigNotFound {
				path: path.to_path_buf(),
			});
		}
		let config = parse_config_file(path)?;
		return Ok(vec![LoadedConfig {
			config,
			path: path.to_path_buf(),
		}]);
	}

	let mut configs = Vec::new();

	let local_path = start_dir.join(CONFIG_FILE_NAME);
	if local_path.exists() {
		let config = parse_config_file(&local_path)?;
		configs.push(LoadedConfig {
			config,
			path: local_path,
		});
	}

	if let Some(user_config) = load_user_config()? {
		configs.push(user_config);
	}

	Ok(configs)
}

/// Load the user's ~/.otapatch.toml if it exists.
fn load_user_config() -> Result<Option<LoadedConfig>> {
	let user_config_path = user_config_path()?;

	if user_config_path.exists() {
		let config = parse_config_file(&user_config_path)?;
		Ok(Some(LoadedConfig {
			config,
			path: user_config_path,
		}))
	} else {
		Ok(None)
	}
}

/// Merge loaded configs and the built-in device table into one effective config.
///
/// Devices and rules are collected in cascade order (first match wins);
/// built-in devices go last so any config file can shadow them.
pub fn merge_configs(configs: &[LoadedConfig]) -> MergedConfig {
	let mut merged = MergedConfig::default();

	for loaded in configs {
		for device in &loaded.config.devices {
			merged.devices.push(DeviceWithSource {
				device: device.clone(),
				source: ConfigSource::File(loaded.path.clone()),
			});
		}

		for rule in &loaded.config.rules {
			merged.rules.push(PatchRuleWithSource {
				rule: rule.clone(),
				source: loaded.path.clone(),
			});
		}
	}

	for device in builtin_devices() {
		merged.devices.push(DeviceWithSource {
			device,
			source: ConfigSource::BuiltIn,
		});
	}

	merged
}

/// Convenience function to discover, load, and merge configs.
pub fn load_merged_config(explicit: Option<&Path>, start_dir: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(explicit, start_dir)?;
	Ok(merge_configs(&configs))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(PatchError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}

/// Devices shipped with the tool.
pub fn builtin_devices() -> Vec<Device> {
	fn device(id: &str, name: &str, system: &str, cache: &str, data: &str) -> Device {
		Device {
			id: id.to_string(),
			name: Some(name.to_string()),
			system: Some(system.to_string()),
			cache: Some(cache.to_string()),
			data: Some(data.to_string()),
		}
	}

	vec![
		device(
			"jflte",
			"Samsung Galaxy S4 (Qualcomm)",
			"/dev/block/platform/msm_sdcc.1/by-name/system",
			"/dev/block/platform/msm_sdcc.1/by-name/cache",
			"/dev/block/platform/msm_sdcc.1/by-name/userdata",
		),
		device(
			"i9500",
			"Samsung Galaxy S4 (Exynos)",
			"/dev/block/mmcblk0p20",
			"/dev/block/mmcblk0p19",
			"/dev/block/mmcblk0p21",
		),
		device(
			"hammerhead",
			"LG Nexus 5",
			"/dev/block/platform/msm_sdcc.1/by-name/system",
			"/dev/block/platform/msm_sdcc.1/by-name/cache",
			"/dev/block/platform/msm_sdcc.1/by-name/userdata",
		),
		device(
			"hlte",
			"Samsung Galaxy Note 3",
			"/dev/block/platform/msm_sdcc.1/by-name/system",
			"/dev/block/platform/msm_sdcc.1/by-name/cache",
			"/dev/block/platform/msm_sdcc.1/by-name/userdata",
		),
		device(
			"falcon",
			"Motorola Moto G",
			"/dev/block/platform/msm_sdcc.1/by-name/system",
			"/dev/block/platform/msm_sdcc.1/by-name/cache",
			"/dev/block/platform/msm_sdcc.1/by-name/userdata",
		),
		device(
			"bacon",
			"OnePlus One",
			"/dev/block/platform/msm_sdcc.1/by-name/system",
			"/dev/block/platform/msm_sdcc.1/by-name/cache",
			"/dev/block/platform/msm_sdcc.1/by-name/userdata",
		),
	]
}

/// A compiled patch rule ready for filename matching.
#[derive(Debug)]
pub struct CompiledPatchRule {
	/// The original rule.
	pub rule: crate::config::types::PatchRule,

	/// Compiled filename pattern regex.
	pub filename_regex: Option<Regex>,

	/// Source config path (for debugging).
	pub source: PathBuf,
}

impl CompiledPatchRule {
	/// Compile a rule from a PatchRuleWithSource.
	pub fn from_rule_with_source(rws: &PatchRuleWithSource) -> Result<Self> {
		let filename_regex = rws
			.rule
			.filename_pattern
			.as_ref()
			.map(|p| compile_pattern(p))
			.transpose()?;

		Ok(CompiledPatchRule {
			rule: rws.rule.clone(),
			filename_regex,
			source: rws.source.clone(),
		})
	}

	/// Check if this rule's pattern matches the given zip filename.
	///
	/// A rule without a pattern never matches a filename; it still defines
	/// flags for its key.
	pub fn matches(&self, filename: &str) -> bool {
		match &self.filename_regex {
			Some(regex) => regex.is_match(filename),
			None => false,
		}
	}
}

/// Compile a filename pattern string.
fn compile_pattern(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| PatchError::InvalidPattern {
		pattern: pattern.to_string(),
		source,
	})
}

/// Compile all patch rules in a merged config.
pub fn compile_patch_rules(config: &MergedConfig) -> Result<Vec<CompiledPatchRule>> {
	config
		.rules
		.iter()
		.map(CompiledPatchRule::from_rule_with_source)
		.collect()
}

/// Resolve a zip filename to its metadata key (first matching rule wins).
pub fn key_from_filename<'a>(rules: &'a [CompiledPatchRule], filename: &str) -> &'a str {
	rules
		.iter()
		.find(|rule| rule.matches(filename))
		.map(|rule| rule.rule.key.as_str())
		.unwrap_or(DEFAULT_RULE_KEY)
}

/// Whether device assertions should be kept for the given key.
///
/// Unknown keys keep their checks; only an explicit rule can turn them off.
pub fn device_check(rules: &[CompiledPatchRule], key: &str) -> bool {
	rules
		.iter()
		.find(|rule| rule.rule.key == key)
		.map(|rule| rule.rule.device_check)
		.unwrap_or(true)
}

/// Template written by `--init`.
pub fn init_template() -> &'static str {
	r#"# otapatch configuration.
#
# Devices defined here are tried before the built-in table. Patch rules are
# matched against the originating zip filename; the first match wins.

[[devices]]
id = "mydevice"
name = "My Device"
system = "/dev/block/bootdevice/by-name/system"
cache = "/dev/block/bootdevice/by-name/cache"
data = "/dev/block/bootdevice/by-name/userdata"

[[rules]]
key = "example-rom"
filename_pattern = '^ExampleRom-.*\.zip$'
device_check = false
"#
}
