use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sheet_url: String,
    pub data_path: String,
    pub log_path: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sheet_url: "https://script.google.com/macros/s/DEPLOYMENT_ID/exec".to_string(),
            data_path: "config/bills.json".to_string(),
            log_path: "config/khata_tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "khata_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the spreadsheet sync endpoint URL.
    #[arg(long)]
    sheet_url: Option<String>,
    /// Override the bills file path (JSON).
    #[arg(long)]
    data_path: Option<String>,
    /// Override the log file path.
    #[arg(long)]
    log_path: Option<String>,
    /// Override the log level (e.g. info, debug).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("KHATA_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(sheet_url) = args.sheet_url {
        settings.sheet_url = sheet_url;
    }
    if let Some(data_path) = args.data_path {
        settings.data_path = data_path;
    }
    if let Some(log_path) = args.log_path {
        settings.log_path = log_path;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}
