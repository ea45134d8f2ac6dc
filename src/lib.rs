pub mod cli;
pub mod config;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::convert::ConvertRequest;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert(ConvertRequest),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("xconv starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Convert(request) => cli::convert::run(&config, &request).await,
    }
}
