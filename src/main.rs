use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use otapatch_cli::config::{
	compile_patch_rules, device_check, discover_configs, init_template, key_from_filename,
	load_merged_config, user_config_path, CONFIG_FILE_NAME,
};
use otapatch_cli::patcher::{AutoPatcher, StandardPatcher, UPDATER_SCRIPT};
use otapatch_cli::script::{read_lines, transform_lines};

#[derive(Parser)]
#[command(name = "otapatch")]
#[command(
	author,
	version,
	about = "CLI tool for retargeting Android updater-scripts to multiboot partition commands"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .otapatch.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .otapatch.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Extracted installer zip tree containing the updater-script
	#[arg(value_name = "TARGET_DIR")]
	target: Option<PathBuf>,

	/// Target device codename (see `otapatch devices`)
	#[arg(long, value_name = "ID")]
	device: Option<String>,

	/// Originating zip filename for patch metadata lookup
	/// (defaults to the target directory's basename)
	#[arg(long, value_name = "NAME")]
	filename: Option<String>,

	/// Use this config file instead of the discovery cascade
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Keep device assertions even when patch metadata says to strip them
	#[arg(long)]
	keep_device_checks: bool,

	/// Show the planned rewrites without touching the script
	#[arg(long)]
	dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// List known devices with their sources
	Devices,

	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display merged effective configuration with source annotations
	Show,
	/// Check all config files for errors without running anything
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	// Handle --init
	if cli.init {
		return handle_init(cli.force);
	}

	// Handle subcommands
	if let Some(ref command) = cli.command {
		return match command {
			Commands::Devices => handle_devices(cli.config.as_deref()),
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(cli.config.as_deref()),
				ConfigAction::Validate => handle_config_validate(cli.config.as_deref()),
			},
		};
	}

	// Handle patching
	if let Some(ref target) = cli.target {
		return handle_patch(&cli, target);
	}

	// No command specified - this shouldn't happen due to arg_required_else_help
	Ok(ExitCode::SUCCESS)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_devices(explicit_config: Option<&Path>) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let config =
		load_merged_config(explicit_config, &cwd).context("Failed to load configuration")?;

	println!("Known devices:\n");
	for entry in &config.devices {
		println!(
			"  {:12} {:32} [{}]",
			entry.device.id,
			entry.device.name.as_deref().unwrap_or("-"),
			entry.source
		);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(explicit_config: Option<&Path>) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(explicit_config, &cwd)
		.context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration files (in cascade order):\n");

	for loaded in &configs {
		println!("# Source: {}", loaded.path.display());
		println!("# devices: {}", loaded.config.devices.len());
		println!("# rules: {}", loaded.config.rules.len());
		println!();

		for (i, device) in loaded.config.devices.iter().enumerate() {
			println!("  Device {}:", i + 1);
			println!("    id: {}", device.id);
			if let Some(ref name) = device.name {
				println!("    name: {}", name);
			}
			if let Some(ref system) = device.system {
				println!("    system: {}", system);
			}
			if let Some(ref cache) = device.cache {
				println!("    cache: {}", cache);
			}
			if let Some(ref data) = device.data {
				println!("    data: {}", data);
			}
			println!();
		}

		for (i, rule) in loaded.config.rules.iter().enumerate() {
			println!("  Rule {}:", i + 1);
			println!("    key: {}", rule.key);
			if let Some(ref pattern) = rule.filename_pattern {
				println!("    filename_pattern: {}", pattern);
			}
			println!("    device_check: {}", rule.device_check);
			println!();
		}
	}

	// Show user config path
	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(explicit_config: Option<&Path>) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match discover_configs(explicit_config, &cwd) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!(
						"  {} ({} devices, {} rules)",
						loaded.path.display(),
						loaded.config.devices.len(),
						loaded.config.rules.len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_patch(cli: &Cli, target: &Path) -> Result<ExitCode> {
	let device_id = cli
		.device
		.as_deref()
		.ok_or_else(|| anyhow::anyhow!("--device is required for patching"))?;

	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let config = load_merged_config(cli.config.as_deref(), &cwd)
		.context("Failed to load configuration")?;
	let device = config.device(device_id)?.clone();

	// Resolve the remove-device-checks decision once, from patch metadata
	// keyed by the originating zip filename.
	let filename = match cli.filename.as_deref() {
		Some(name) => name.to_string(),
		None => target
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default(),
	};
	let rules = compile_patch_rules(&config).context("Failed to compile patch rules")?;
	let key = key_from_filename(&rules, &filename);
	let remove_device_checks = !cli.keep_device_checks && !device_check(&rules, key);

	if cli.dry_run {
		return handle_dry_run(target, &device, remove_device_checks);
	}

	let patcher = StandardPatcher::new(device, remove_device_checks);
	patcher
		.patch_files(target)
		.with_context(|| format!("Failed to patch {}", target.display()))?;

	println!("Patched {}", target.join(UPDATER_SCRIPT).display());
	Ok(ExitCode::SUCCESS)
}

fn handle_dry_run(
	target: &Path,
	device: &otapatch_cli::config::Device,
	remove_device_checks: bool,
) -> Result<ExitCode> {
	let script_path = target.join(UPDATER_SCRIPT);
	let original = read_lines(&script_path)
		.with_context(|| format!("Failed to read {}", script_path.display()))?;

	let mut rewritten = original.clone();
	transform_lines(&mut rewritten, device, remove_device_checks);

	let mut changed = 0;
	for (before, after) in original.iter().zip(&rewritten) {
		if before != after {
			println!("-{before}");
			println!("+{after}");
			changed += 1;
		}
	}

	if changed == 0 {
		println!("No lines to rewrite.");
	} else {
		println!("{changed} line(s) would be rewritten.");
	}

	Ok(ExitCode::SUCCESS)
}
