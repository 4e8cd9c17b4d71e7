//! Configuration loading and parsing for otapatch.
//!
//! This module handles:
//! - TOML config file parsing
//! - Config discovery and merging
//! - The built-in device table and patch rule lookup

pub mod lookup;
pub mod parser;
pub mod types;

pub use lookup::{
	builtin_devices, compile_patch_rules, device_check, discover_configs, init_template,
	key_from_filename, load_merged_config, merge_configs, user_config_path, CompiledPatchRule,
	CONFIG_FILE_NAME, DEFAULT_RULE_KEY,
};
pub use parser::{parse_config_file, parse_config_str};
pub use types::{
	Config, ConfigSource, Device, DeviceWithSource, LoadedConfig, MergedConfig, Partition,
	PatchRule, PatchRuleWithSource,
};
