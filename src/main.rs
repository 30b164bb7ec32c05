//! Setup Advisor - guided business setup wizard
//!
//! Runs the interactive terminal wizard when started without arguments,
//! otherwise resolves the requested view once and prints it.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use setup_advisor::{
    Cli, Config, ReferenceCatalog, TuiApp, WizardController, should_run_interactive,
};
use std::path::{Path, PathBuf};
use tracing::{Level, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Settings file picked up by interactive mode
const DEFAULT_CONFIG_FILE: &str = "advisor.toml";

fn main() -> Result<()> {
    if should_run_interactive() {
        return run_interactive_mode();
    }

    run_cli_mode()
}

/// Run in interactive mode with Ratatui TUI
fn run_interactive_mode() -> Result<()> {
    let exe_dir = get_executable_dir()?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = exe_dir
        .join("Log")
        .join(format!("Interactive_{}.log", timestamp));

    // File-only logging; the terminal belongs to ratatui
    let _guard = setup_file_only_logging(&log_path)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Setup Advisor starting in interactive mode"
    );

    let config = load_default_config(&exe_dir)?;
    let catalog = ReferenceCatalog::load_or_builtin(config.catalog_path.as_deref())
        .context("Failed to load catalog")?;
    let controller = WizardController::from_config(&catalog, &config);

    let result = TuiApp::new(controller).run()?;

    if let Some(link) = result.contact_link {
        println!("Contact link: {}", link);
    }
    info!(log_file = %log_path.display(), "Interactive session complete");

    Ok(())
}

/// Run in one-shot CLI mode
fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    if cli.sample_config {
        print!("{}", Config::sample_config());
        return Ok(());
    }

    let exe_dir = get_executable_dir()?;
    let log_path = get_log_path(&exe_dir, &cli);
    let guard = setup_logging(&cli, &log_path)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Setup Advisor starting");

    let config = load_config(&cli)?;
    let catalog = ReferenceCatalog::load_or_builtin(config.catalog_path.as_deref())
        .context("Failed to load catalog")?;

    if cli.dump_catalog {
        print!("{}", catalog.to_toml_string()?);
        return Ok(());
    }

    if cli.list {
        print!("{}", setup_advisor::tui::format_catalog(&catalog));
        return Ok(());
    }

    let controller = WizardController::from_config(&catalog, &config);
    let view = match controller
        .walk(cli.choices())
        .and_then(|session| controller.current_view(&session))
    {
        Ok(view) => view,
        Err(e) => {
            error!(error = %e, "Wizard failed");
            eprintln!("Error: {}", e);
            drop(guard);
            std::process::exit(if e.is_recoverable() { 2 } else { 1 });
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        setup_advisor::tui::print_view(&view);
    }

    info!(stage = %view.stage(), "View printed");
    Ok(())
}

/// Get the directory where the executable is located
fn get_executable_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe()?;
    Ok(exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Determine the log file path based on config file or timestamp
fn get_log_path(exe_dir: &Path, cli: &Cli) -> PathBuf {
    let log_dir = exe_dir.join("Log");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    match cli.config_name() {
        Some(config_name) => log_dir
            .join(&config_name)
            .join(format!("{}_{}.log", config_name, timestamp)),
        None => log_dir.join(format!("CLIRun_{}.log", timestamp)),
    }
}

/// Load configuration from file, then apply CLI overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let config = match cli.config {
        Some(ref path) => {
            info!(config_file = %path.display(), "Loading configuration from file");
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };

    let config = cli.merge_with_config(config);
    if cli.verbose {
        info!(?config, "Configuration loaded");
    }
    Ok(config)
}

/// Load `Config/advisor.toml` next to the executable when present
fn load_default_config(exe_dir: &Path) -> Result<Config> {
    let path = exe_dir.join("Config").join(DEFAULT_CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }

    info!(config_file = %path.display(), "Loading configuration from file");
    Ok(Config::load_from_file(&path)?)
}

/// Setup logging for CLI mode (file + stderr)
fn setup_logging(cli: &Cli, log_path: &Path) -> Result<WorkerGuard> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let (non_blocking, guard) = tracing_appender::non_blocking(open_log_file(log_path)?);

    let subscriber = tracing_subscriber::registry().with(env_filter);
    // Only warnings reach stderr so printed views stay clean
    macro_rules! stderr_layer {
        () => {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::filter::LevelFilter::WARN)
        };
    }

    if cli.json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .with(stderr_layer!())
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .with(stderr_layer!())
            .init();
    }

    Ok(guard)
}

/// Setup logging for interactive mode (file only, no console)
fn setup_file_only_logging(log_path: &Path) -> Result<WorkerGuard> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let (non_blocking, guard) = tracing_appender::non_blocking(open_log_file(log_path)?);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(guard)
}

fn open_log_file(log_path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    Ok(file)
}
