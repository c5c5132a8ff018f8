use crate::app::App;
use color_eyre::eyre::WrapErr;
use pong_core::{Config, ConfigError};
use std::fs::File;
use std::path::PathBuf;

pub mod app;
pub mod event;
pub mod ui;
pub mod viewport;

/// Config file read when PONG_CONFIG is unset
const DEFAULT_CONFIG: &str = "pong.toml";
/// Log file; stdout belongs to the terminal UI
const LOG_FILE: &str = "pong-terminal.log";

fn init_logging() -> color_eyre::Result<()> {
    // Logging is opt-in through RUST_LOG
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let file = File::create(LOG_FILE).wrap_err("failed to create log file")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config() -> color_eyre::Result<Config> {
    let path = std::env::var_os("PONG_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    match Config::load(&path) {
        Ok(config) => {
            log::info!("loaded config from {}", path.display());
            Ok(config)
        }
        Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("{} not found, using defaults", path.display());
            Ok(Config::default())
        }
        Err(e) => Err(e).wrap_err_with(|| format!("invalid config {}", path.display())),
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging()?;
    let config = load_config()?;

    let terminal = ratatui::init();
    let result = App::new(config).and_then(|app| app.run(terminal));
    ratatui::restore();
    result
}
