//! Otapatch - CLI tool for retargeting Android updater-scripts to multiboot
//! partition commands.
//!
//! This library provides the core functionality for otapatch, including:
//! - Configuration file parsing and discovery
//! - The built-in device table and patch-rule lookup
//! - Updater-script line classification and rewriting
//! - The `AutoPatcher` surface for host orchestrators
//!
//! # Example
//!
//! ```no_run
//! use otapatch_cli::config::{compile_patch_rules, device_check, key_from_filename, load_merged_config};
//! use otapatch_cli::patcher::{AutoPatcher, StandardPatcher};
//! use std::path::Path;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let config = load_merged_config(None, &cwd).unwrap();
//! let rules = compile_patch_rules(&config).unwrap();
//!
//! let device = config.device("hammerhead").unwrap();
//! let key = key_from_filename(&rules, "cm-11-20140504-NIGHTLY-hammerhead.zip");
//! let patcher = StandardPatcher::new(device.clone(), !device_check(&rules, key));
//!
//! patcher.patch_files(Path::new("extracted-zip")).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod patcher;
pub mod script;

pub use error::{PatchError, Result};
