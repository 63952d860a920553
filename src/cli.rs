//! Command-line entry point: flags, settings, logging, REPL start-up.

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::system_clock::SystemClock;
use crate::adapters::yaml_adapter::YamlAdapter;
use crate::domain::error::StocksError;
use crate::domain::trade_window::DEFAULT_WINDOW_SECONDS;
use crate::ports::config_port::ConfigPort;
use crate::ports::database_port::DatabasePort;
use crate::shell::{Shell, DEFAULT_INTRO, DEFAULT_PROMPT};

#[derive(Parser, Debug)]
#[command(
    name = "stockscli",
    about = "Record simulated stock trades and compute GBCE formulas"
)]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// YAML stock database to load at start-up
    #[arg(short, long)]
    pub data: Option<PathBuf>,
    /// Trade window for the volume-weighted price, in seconds
    #[arg(short, long)]
    pub window: Option<f64>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Effective session settings after merging config file and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub prompt: String,
    pub intro: Option<String>,
    pub data_path: Option<PathBuf>,
    pub window_seconds: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            intro: Some(DEFAULT_INTRO.to_string()),
            data_path: None,
            window_seconds: DEFAULT_WINDOW_SECONDS,
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.verbose);

    let settings = match resolve_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    tracing::debug!(?settings, "resolved settings");

    let store = YamlAdapter::new();
    let mut shell = Shell::new(
        Box::new(SystemClock),
        Box::new(store),
        settings.window_seconds,
    );

    if let Some(path) = &settings.data_path {
        match store.load(path) {
            Ok(db) => {
                tracing::info!(path = %path.display(), stocks = db.len(), "preloaded stock database");
                shell = shell.with_database(db);
            }
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    if let Some(intro) = &settings.intro {
        println!("{intro}");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    match shell.run(stdin.lock(), stdout.lock(), &settings.prompt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let err = StocksError::from(e);
            eprintln!("error: {err}");
            (&err).into()
        }
    }
}

pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, StocksError> {
    FileConfigAdapter::from_file(path).map_err(|e| StocksError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Config file first, then command-line overrides.
pub fn resolve_settings(cli: &Cli) -> Result<Settings, StocksError> {
    let mut settings = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            build_settings(&load_config(path)?)?
        }
        None => Settings::default(),
    };

    if let Some(data) = &cli.data {
        settings.data_path = Some(data.clone());
    }
    if let Some(window) = cli.window {
        settings.window_seconds = validate_window(window, &window.to_string())?;
    }
    Ok(settings)
}

pub fn build_settings(config: &dyn ConfigPort) -> Result<Settings, StocksError> {
    let defaults = Settings::default();

    let window_seconds = match config.get_double("formulas", "window_seconds") {
        None => defaults.window_seconds,
        Some(Ok(value)) => validate_window(value, &value.to_string())?,
        Some(Err(raw)) => {
            return Err(window_invalid(format!("expected a number, got '{raw}'")));
        }
    };

    let intro = if config.get_bool("shell", "quiet", false) {
        None
    } else {
        config.get_string("shell", "intro").or(defaults.intro)
    };

    Ok(Settings {
        prompt: config
            .get_string("shell", "prompt")
            .map(|p| format!("{} ", p.trim_end()))
            .unwrap_or(defaults.prompt),
        intro,
        data_path: config.get_string("data", "path").map(PathBuf::from),
        window_seconds,
    })
}

fn validate_window(value: f64, raw: &str) -> Result<f64, StocksError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(window_invalid(format!(
            "expected a positive number of seconds, got '{raw}'"
        )))
    }
}

fn window_invalid(reason: String) -> StocksError {
    StocksError::ConfigInvalid {
        section: "formulas".into(),
        key: "window_seconds".into(),
        reason,
    }
}
