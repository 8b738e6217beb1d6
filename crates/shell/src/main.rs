mod shell;

use anyhow::Result;
use std::fs::{self, OpenOptions};

use carrental_core::{
    config::{self, AppConfig},
    RentalApi, RentalService,
};
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<()> {
    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    init_logging(&config)?;

    let service = RentalService::from_config(&config);
    let mut shell = shell::Shell::new(RentalApi::new(service));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell.run(stdin.lock(), stdout.lock())
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let log_dir = config.log_dir();
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("carrental.log");

    let env_filter = EnvFilter::from_default_env();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(std::sync::Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
