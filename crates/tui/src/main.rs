mod app;
mod client;
mod config;
mod error;
mod keyboard;
mod ui;

use std::path::Path;

use crate::{config::AppConfig, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

// The terminal belongs to the UI, so the subscriber writes to a file.
fn init_tracing(config: &AppConfig) -> Result<()> {
    if let Some(parent) = Path::new(&config.log_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = std::fs::File::create(&config.log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "khata_tui={level},ledger={level}",
            level = config.log_level
        ))
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    Ok(())
}
