mod advise;
mod backend;
mod cli;
mod host;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use attire_ai::SessionManager;
use attire_common::{AttireError, ConfigError};
use attire_config::AttireConfig;
use attire_panel::{Panel, PanelSettings};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

const DEFAULT_DIRECTIVE: &str = "attire=info";

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Variables already set in the environment win.
fn load_dotenv() {
    let mut candidates = vec![PathBuf::from(".env")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("attire").join(".env"));
    }

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for (key, value) in parse_dotenv(&contents) {
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
            return;
        }
    }
}

fn parse_dotenv(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = key.trim();
            let key = key.strip_prefix("export ").unwrap_or(key).trim();
            (key, value.trim().trim_matches('"').trim_matches('\''))
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Turn a `--log-level` value into a filter directive. A bare level applies
/// to the attire crates only.
fn log_directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("attire={level}")
    }
}

/// Logs go to stderr; stdout carries IPC traffic and command output.
fn init_logging(directive: &str) {
    let mut filter = EnvFilter::from_default_env();
    for candidate in [directive, DEFAULT_DIRECTIVE] {
        if let Ok(parsed) = candidate.parse() {
            filter = filter.add_directive(parsed);
            break;
        }
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load_config(path: Option<&std::path::Path>) -> Result<AttireConfig, ConfigError> {
    match path {
        Some(path) => attire_config::load_config_from(path),
        None => attire_config::load_config(),
    }
}

fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

// Synchronous so the environment is settled before any runtime thread exists.
fn main() -> ExitCode {
    load_dotenv();
    let args = cli::parse();

    let loaded = load_config(args.config.as_deref());
    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => log_directive(level),
        (None, Ok(config)) => log_directive(config.logging.level.as_directive()),
        (None, Err(_)) => DEFAULT_DIRECTIVE.to_string(),
    };
    init_logging(&directive);

    tracing::info!("attire v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }

    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start async runtime");
            eprintln!("error: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args, loaded)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "attire failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, loaded: Result<AttireConfig, ConfigError>) -> Result<(), AttireError> {
    let command = args.command.unwrap_or(Command::Panel);

    // Printing the config is the one command where a broken file is fatal.
    if command == Command::Config {
        let config = loaded?;
        println!("{}", attire_config::config_to_json(&config));
        return Ok(());
    }

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        AttireConfig::default()
    });
    let service = backend::build_service(&config.model);
    let settings = PanelSettings::from_config(&config);

    match command {
        Command::Panel => {
            let manager = Arc::new(SessionManager::new(service));
            let (panel, updates) = Panel::new(manager, settings);
            let stdin = BufReader::new(tokio::io::stdin());
            host::serve(Arc::new(panel), updates, stdin, tokio::io::stdout()).await
        }
        Command::Advise(advise_args) => {
            let text = advise::advise(service, settings, &advise_args).await?;
            print!("{text}");
            Ok(())
        }
        Command::Defaults => {
            print!("{}", advise::defaults(service).await?);
            Ok(())
        }
        Command::Config => Ok(()),
    }
}
