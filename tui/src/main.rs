use std::fs::File;

use anyhow::{Context, Result};

mod app;
mod config;
mod state;
mod ui;

/// The alternate screen hides stderr, so logs go to a file.
const LOG_FILE: &str = "regression_tui.log";

fn init_logger() -> Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("cannot create {LOG_FILE}"))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}

fn main() -> Result<()> {
    init_logger()?;

    let config = match std::env::args().nth(1) {
        Some(path) => config::load(&path).map_err(anyhow::Error::msg)?,
        None => config::AppConfig::default(),
    };

    log::info!("starting with {config:?}");
    app::run::run(config)
}
