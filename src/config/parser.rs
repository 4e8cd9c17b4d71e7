use crate::config::types::Config;
use crate::error::{PatchError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| PatchError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| PatchError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	// Validate the parsed config
	config.validate()?;

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::Partition;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let content = "";
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(config.devices.is_empty());
		assert!(config.rules.is_empty());
	}

	#[test]
	fn test_parse_devices_array_of_tables() {
		let content = r#"
[[devices]]
id = "hammerhead"
name = "LG Nexus 5"
system = "/dev/block/platform/msm_sdcc.1/by-name/system"
cache = "/dev/block/platform/msm_sdcc.1/by-name/cache"
data = "/dev/block/platform/msm_sdcc.1/by-name/userdata"

[[devices]]
id = "i9500"
system = "/dev/block/mmcblk0p20"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.devices.len(), 2);

		let device1 = &config.devices[0];
		assert_eq!(device1.id, "hammerhead");
		assert_eq!(device1.name, Some("LG Nexus 5".to_string()));
		assert_eq!(
			device1.partition_alias(Partition::System),
			Some("/dev/block/platform/msm_sdcc.1/by-name/system")
		);

		let device2 = &config.devices[1];
		assert_eq!(device2.id, "i9500");
		assert!(device2.name.is_none());
		assert_eq!(
			device2.partition_alias(Partition::System),
			Some("/dev/block/mmcblk0p20")
		);
		assert_eq!(device2.partition_alias(Partition::Cache), None);
		assert_eq!(device2.partition_alias(Partition::Data), None);
	}

	#[test]
	fn test_empty_alias_counts_as_undefined() {
		let content = r#"
[[devices]]
id = "blank"
system = ""
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.devices[0].partition_alias(Partition::System), None);
	}

	#[test]
	fn test_parse_rules() {
		let content = r#"
[[rules]]
key = "cm-nightly"
filename_pattern = '^cm-11-.*\.zip$'
device_check = false

[[rules]]
key = "stock"
filename_pattern = '.*stock.*'
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.rules.len(), 2);

		let rule1 = &config.rules[0];
		assert_eq!(rule1.key, "cm-nightly");
		assert_eq!(rule1.filename_pattern, Some(r"^cm-11-.*\.zip$".to_string()));
		assert!(!rule1.device_check);

		// device_check defaults to true when omitted
		let rule2 = &config.rules[1];
		assert_eq!(rule2.key, "stock");
		assert!(rule2.device_check);
	}

	#[test]
	fn test_empty_device_id_rejected() {
		let content = r#"
[[devices]]
id = ""
"#;
		let path = PathBuf::from("test.toml");
		let result = parse_config_str(content, &path);

		assert!(result.is_err());
		match result.unwrap_err() {
			PatchError::EmptyDeviceId => {}
			other => panic!("Expected EmptyDeviceId, got {other:?}"),
		}
	}

	#[test]
	fn test_duplicate_device_id_rejected() {
		let content = r#"
[[devices]]
id = "jflte"

[[devices]]
id = "jflte"
"#;
		let path = PathBuf::from("test.toml");
		let result = parse_config_str(content, &path);

		assert!(result.is_err());
		match result.unwrap_err() {
			PatchError::DuplicateDeviceId { id } => assert_eq!(id, "jflte"),
			other => panic!("Expected DuplicateDeviceId, got {other:?}"),
		}
	}

	#[test]
	fn test_empty_rule_key_rejected() {
		let content = r#"
[[rules]]
key = ""
"#;
		let path = PathBuf::from("test.toml");
		let result = parse_config_str(content, &path);

		assert!(result.is_err());
		match result.unwrap_err() {
			PatchError::EmptyRuleKey => {}
			other => panic!("Expected EmptyRuleKey, got {other:?}"),
		}
	}

	#[test]
	fn test_invalid_toml_rejected() {
		let content = "invalid toml [[[";
		let path = PathBuf::from("test.toml");
		let result = parse_config_str(content, &path);

		assert!(result.is_err());
		match result.unwrap_err() {
			PatchError::ConfigParseError { path, .. } => {
				assert_eq!(path, PathBuf::from("test.toml"));
			}
			other => panic!("Expected ConfigParseError, got {other:?}"),
		}
	}
}
