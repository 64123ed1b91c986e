//! strata CLI - inspect layered configuration
//!
//! Usage: strata [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show     Print the merged configuration (or one path of it)
//!   sources  List the sources in the order they were applied
//!   check    Report strictness and override warnings
//!   diff     Print what a second file changes relative to a first

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use strata::{diff_deep, Config, Format, LoadOptions, Node, Value};

/// strata - layered configuration inspector
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration directory (repeatable; overrides STRATA_CONFIG_DIR)
    #[arg(long = "config-dir", global = true)]
    config_dirs: Vec<PathBuf>,

    /// Deployment environment(s), comma-separated (overrides STRATA_ENV)
    #[arg(long, global = true)]
    env: Option<String>,

    /// Application instance (overrides STRATA_APP_INSTANCE)
    #[arg(long, global = true)]
    instance: Option<String>,

    /// Fail on strictness violations instead of warning
    #[arg(long, global = true)]
    strict: bool,

    /// JSON override applied last
    #[arg(long = "override", value_name = "JSON", global = true)]
    override_json: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the merged configuration (or one path of it)
    Show {
        /// Dotted path such as `db.host`
        path: Option<String>,
    },

    /// List the sources in the order they were applied
    Sources,

    /// Report strictness and override warnings (exits non-zero if any)
    Check,

    /// Print what CHANGED adds or changes relative to BASE
    Diff {
        /// Base configuration file (json, toml, yaml)
        base: PathBuf,
        /// Changed configuration file
        changed: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Show { path } => cmd_show(&cli, path.as_deref()),
        Commands::Sources => cmd_sources(&cli),
        Commands::Check => cmd_check(&cli),
        Commands::Diff { base, changed } => cmd_diff(base, changed),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(cli: &Cli) -> LoadOptions {
    let mut options = LoadOptions::from_env();
    if !cli.config_dirs.is_empty() {
        options = options.with_config_dirs(cli.config_dirs.iter().cloned());
    }
    if let Some(env) = &cli.env {
        options = options.with_environments(env.split(','));
    }
    if let Some(instance) = &cli.instance {
        options = options.with_instance(instance.clone());
    }
    if cli.strict {
        options = options.with_strict(true);
    }
    if let Some(json) = &cli.override_json {
        options = options.with_arg_override(json.clone());
    }
    options
}

fn load(cli: &Cli) -> Result<Config> {
    Config::load(load_options(cli)).context("failed to load configuration")
}

fn cmd_show(cli: &Cli, path: Option<&str>) -> Result<()> {
    let config = load(cli)?;
    let value = match path {
        Some(path) => config.to_object_at(path)?,
        None => config.to_object(),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn cmd_sources(cli: &Cli) -> Result<()> {
    let config = load(cli)?;
    let sources = config.sources();

    if cli.json {
        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        let output = serde_json::json!({
            "environments": config.environments(),
            "instance": config.instance(),
            "sources": names,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Environments: {}", config.environments().join(", "));
    if let Some(instance) = config.instance() {
        println!("Instance: {instance}");
    }
    if sources.is_empty() {
        println!("No sources loaded.");
    }
    for (index, source) in sources.iter().enumerate() {
        println!("  {}. {}", index + 1, source.name);
    }
    Ok(())
}

fn cmd_check(cli: &Cli) -> Result<()> {
    let config = load(cli)?;
    let warnings = config.warnings();

    if cli.json {
        let items: Vec<_> = warnings
            .iter()
            .map(|w| {
                serde_json::json!({
                    "kind": format!("{:?}", w.kind),
                    "message": w.to_string(),
                    "source": w.source,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "warnings": items }))?);
    } else if warnings.is_empty() {
        println!("✓ No configuration warnings");
    } else {
        for warning in warnings {
            println!("⚠ {warning}");
        }
    }

    if !warnings.is_empty() {
        anyhow::bail!("{} configuration warning(s)", warnings.len());
    }
    Ok(())
}

fn cmd_diff(base: &Path, changed: &Path) -> Result<()> {
    let base = read_document(base)?;
    let changed = read_document(changed)?;
    let delta = diff_deep(&base, &changed);
    let json = strata::infrastructure::parsers::to_json(&Value::Node(delta));
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn read_document(path: &Path) -> Result<Node> {
    let format = Format::from_path(path)
        .with_context(|| format!("unsupported file type: {}", path.display()))?;
    let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(format.parse(&path.display().to_string(), &text)?)
}
