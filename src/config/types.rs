use serde::Deserialize;
use std::path::PathBuf;

/// Canonical partition referenced by an updater-script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
	System,
	Cache,
	Data,
}

impl Partition {
	/// All partitions, in classification precedence order.
	pub const ALL: [Partition; 3] = [Partition::System, Partition::Cache, Partition::Data];

	/// Canonical key used in device definitions.
	pub fn key(&self) -> &'static str {
		match self {
			Partition::System => "system",
			Partition::Cache => "cache",
			Partition::Data => "data",
		}
	}

	/// Canonical mount point substituted into rewritten lines.
	pub fn root_path(&self) -> &'static str {
		match self {
			Partition::System => "/system",
			Partition::Cache => "/cache",
			Partition::Data => "/data",
		}
	}
}

/// A target device and its partition block-device paths.
///
/// Aliases are the device-specific paths a script may use in place of the
/// canonical partition name. An absent or empty alias means the device does
/// not define one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Device {
	/// Device codename (e.g. "hammerhead").
	pub id: String,

	/// Human-readable device name.
	pub name: Option<String>,

	/// Block-device path for the system partition.
	pub system: Option<String>,

	/// Block-device path for the cache partition.
	pub cache: Option<String>,

	/// Block-device path for the data partition.
	pub data: Option<String>,
}

impl Device {
	/// Look up the device-specific path alias for a partition.
	///
	/// Returns `None` when the device defines no alias for that partition;
	/// an empty string in the config counts as undefined.
	pub fn partition_alias(&self, partition: Partition) -> Option<&str> {
		let alias = match partition {
			Partition::System => &self.system,
			Partition::Cache => &self.cache,
			Partition::Data => &self.data,
		};
		alias.as_deref().filter(|alias| !alias.is_empty())
	}
}

/// Patch metadata for a family of installer zips.
///
/// `key_from_filename` resolves a zip filename to the key of the first rule
/// whose pattern matches; the rule's flags then apply to that zip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PatchRule {
	/// Lookup key identifying this rule.
	pub key: String,

	/// Regex matched against the originating zip filename.
	pub filename_pattern: Option<String>,

	/// Whether the script's device assertions should be kept.
	/// Defaults to true; set false for zips whose checks reject multiboot.
	#[serde(default = "default_device_check")]
	pub device_check: bool,
}

fn default_device_check() -> bool {
	true
}

impl Default for PatchRule {
	fn default() -> Self {
		PatchRule {
			key: String::new(),
			filename_pattern: None,
			device_check: true,
		}
	}
}

/// Top-level configuration from a `.otapatch.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
	/// Device definitions, tried before the built-in table.
	#[serde(default)]
	pub devices: Vec<Device>,

	/// Patch metadata rules. First matching rule wins.
	#[serde(default)]
	pub rules: Vec<PatchRule>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Where a merged entry was defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
	/// Shipped with the tool.
	BuiltIn,

	/// Loaded from a config file.
	File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ConfigSource::BuiltIn => f.write_str("built-in"),
			ConfigSource::File(path) => write!(f, "{}", path.display()),
		}
	}
}

/// A device with its source for debugging/display.
#[derive(Debug, Clone)]
pub struct DeviceWithSource {
	/// The device itself.
	pub device: Device,

	/// Where the device was defined.
	pub source: ConfigSource,
}

/// A patch rule with its source config path for debugging/display.
#[derive(Debug, Clone)]
pub struct PatchRuleWithSource {
	/// The rule itself.
	pub rule: PatchRule,

	/// The config file this rule came from.
	pub source: PathBuf,
}

/// Merged configuration from all config sources.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// Devices from all sources, most specific first (first id match wins).
	pub devices: Vec<DeviceWithSource>,

	/// Patch rules from all config files, in lookup order.
	pub rules: Vec<PatchRuleWithSource>,
}

impl MergedConfig {
	/// Find a device by codename. Earlier sources shadow later ones.
	pub fn find_device(&self, id: &str) -> Option<&Device> {
		self.devices
			.iter()
			.map(|entry| &entry.device)
			.find(|device| device.id == id)
	}

	/// Look up a device by codename, failing if it is not defined anywhere.
	pub fn device(&self, id: &str) -> Result<&Device, crate::error::PatchError> {
		self.find_device(id)
			.ok_or_else(|| crate::error::PatchError::UnknownDevice { id: id.to_string() })
	}
}

impl Config {
	/// Validate device and rule entries in this config.
	pub fn validate(&self) -> Result<(), crate::error::PatchError> {
		for (i, device) in self.devices.iter().enumerate() {
			if device.id.is_empty() {
				return Err(crate::error::PatchError::EmptyDeviceId);
			}
			if self.devices[..i].iter().any(|other| other.id == device.id) {
				return Err(crate::error::PatchError::DuplicateDeviceId {
					id: device.id.clone(),
				});
			}
		}

		for rule in &self.rules {
			if rule.key.is_empty() {
				return Err(crate::error::PatchError::EmptyRuleKey);
			}
		}

		Ok(())
	}
}
