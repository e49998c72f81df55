use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use reassert_cli::batch::{BatchOptions, ScanOptions, collect_candidates, run_batch};
use reassert_cli::config::{
	CONFIG_FILE_NAME, Config, DEFAULT_FILTER, init_template, resolve_config, user_config_path,
};
use reassert_cli::rules::{Pass, Step, default_passes, select_passes};

#[derive(Parser)]
#[command(name = "reassert")]
#[command(
	author,
	version,
	about = "CLI tool for migrating test suites from TUnit to xUnit assertion syntax"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Directory containing the test sources to convert
	#[arg(value_name = "DIR")]
	dir: Option<PathBuf>,

	/// Glob applied to candidate file names (default: *.cs)
	#[arg(long, value_name = "GLOB")]
	filter: Option<String>,

	/// File name to leave untouched (repeatable, extends the config)
	#[arg(long, value_name = "NAME")]
	exclude: Vec<String>,

	/// Descend into subdirectories
	#[arg(long)]
	recursive: bool,

	/// Comma-separated subset of passes to run
	#[arg(long, value_name = "NAMES", value_delimiter = ',')]
	passes: Vec<String>,

	/// Report what would change without writing anything
	#[arg(long)]
	dry_run: bool,

	/// Print a unified diff for each changed file
	#[arg(long)]
	diff: bool,

	/// Path to a config file (default: <DIR>/.reassert.toml, then ~/.reassert.toml)
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Create a template .reassert.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .reassert.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Rule catalog commands
	Rules {
		#[command(subcommand)]
		action: RulesAction,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum RulesAction {
	/// List the built-in passes and their rules
	List,
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the effective configuration and its source
	Show,
	/// Check the config file for errors without converting anything
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
			Commands::Rules { action } => match action {
				RulesAction::List => handle_rules_list(),
			},
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(&cli),
				ConfigAction::Validate => handle_config_validate(&cli),
			},
		};
	}

	// Handle conversion runs
	if let Some(ref dir) = cli.dir {
		return handle_convert(dir, &cli);
	}

	// No action specified - this shouldn't happen due to arg_required_else_help
	Ok(ExitCode::SUCCESS)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!(".reassert.toml already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created .reassert.toml");
	Ok(ExitCode::SUCCESS)
}

fn handle_rules_list() -> Result<ExitCode> {
	let passes = default_passes().context("Failed to build pass catalog")?;

	for pass in &passes {
		println!("{}: {}", pass.name, pass.description);
		for step in &pass.steps {
			match step {
				Step::Rule(rule) => println!("  {}  ({})", rule.name, rule.pattern_str()),
				Step::Scoped { name, .. } => println!("  {}  (line-oriented)", name),
			}
		}
		println!();
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(cli: &Cli) -> Result<ExitCode> {
	let dir = lookup_dir(cli)?;
	let loaded = resolve_config(&dir, cli.config.as_deref())
		.context("Failed to load configuration")?;

	match loaded {
		None => println!("No configuration file found, using defaults."),
		Some(loaded) => {
			println!("# Source: {}", loaded.path.display());
			println!(
				"# filter: {}",
				loaded.config.filter.as_deref().unwrap_or(DEFAULT_FILTER)
			);
			println!("# recursive: {}", loaded.config.recursive.unwrap_or(false));
			println!("# exclude: {}", loaded.config.exclude.len());
			for name in &loaded.config.exclude {
				println!("    {}", name);
			}
			match loaded.config.passes {
				Some(ref passes) => println!("# passes: {}", passes.join(", ")),
				None => println!("# passes: all"),
			}
		}
	}

	// Show user config path
	if let Ok(user_path) = user_config_path() {
		println!();
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(cli: &Cli) -> Result<ExitCode> {
	let dir = lookup_dir(cli)?;

	match resolve_config(&dir, cli.config.as_deref()) {
		Ok(None) => {
			println!("No configuration file found.");
			Ok(ExitCode::SUCCESS)
		}
		Ok(Some(loaded)) => {
			println!("Configuration file is valid: {}", loaded.path.display());
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_convert(dir: &Path, cli: &Cli) -> Result<ExitCode> {
	if !dir.is_dir() {
		anyhow::bail!("Not a directory: {}", dir.display());
	}

	let loaded = resolve_config(dir, cli.config.as_deref())
		.context("Failed to load configuration")?;
	let config = loaded.map(|loaded| loaded.config).unwrap_or_default();

	let filter = cli
		.filter
		.clone()
		.or_else(|| config.filter.clone())
		.unwrap_or_else(|| DEFAULT_FILTER.to_string());
	let recursive = cli.recursive || config.recursive.unwrap_or(false);

	let mut excludes = config.exclude.clone();
	excludes.extend(cli.exclude.iter().cloned());

	let passes = resolve_passes(&cli.passes, &config)?;

	let scan = ScanOptions::new(&filter, excludes, recursive)
		.with_context(|| format!("Invalid file filter: {}", filter))?;
	let candidates = collect_candidates(dir, &scan)
		.with_context(|| format!("Failed to scan {}", dir.display()))?;

	let options = BatchOptions {
		passes: &passes,
		dry_run: cli.dry_run,
		show_diff: cli.diff,
	};
	let summary = run_batch(&candidates, &options);

	println!("{}", summary.report(cli.dry_run));

	// Per-file failures were already reported; they never fail the run.
	Ok(ExitCode::SUCCESS)
}

/// Pick the pass pipeline: CLI selection, then config, then all passes.
fn resolve_passes(cli_passes: &[String], config: &Config) -> Result<Vec<Pass>> {
	if !cli_passes.is_empty() {
		return select_passes(cli_passes).context("Invalid --passes selection");
	}
	if let Some(ref names) = config.passes {
		return select_passes(names).context("Invalid pass selection in config");
	}
	default_passes().context("Failed to build pass catalog")
}

/// Directory used for config lookup by the config subcommands.
fn lookup_dir(cli: &Cli) -> Result<PathBuf> {
	match cli.dir {
		Some(ref dir) => Ok(dir.clone()),
		None => std::env::current_dir().context("Failed to get current directory"),
	}
}
