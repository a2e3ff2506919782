use storefront_console::error::ConsoleError;
use storefront_console::locations::{config_dir, ensure_dir, log_dir};
use storefront_console::logger::initialize as LoggerInitialize;
use storefront_console::session_check::{credentials_from_env, run};

use api_client::config::CONFIG_FILE_NAME;
use api_client::{ApiClient, ClientConfig};

use common::ErrorLocation;

use std::panic::Location;
use std::process::ExitCode;

use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn start() -> Result<(), ConsoleError> {
    let log_dir = log_dir()?;
    ensure_dir(&log_dir)?;

    // Logger first, so config loading is logged
    LoggerInitialize(&log_dir)?;

    info!("Storefront console starting");
    info!("Log directory: {}", log_dir.display());

    let config_path = config_dir()?.join(CONFIG_FILE_NAME);
    let config = ClientConfig::load_with_env(&config_path)?;
    info!("API root: {}", config.api_root()?);

    let client = ApiClient::new(&config)?;
    let credentials = credentials_from_env()?;

    let report = run(&client, &credentials).await?;

    let profile = serde_json::to_string_pretty(&report.user).map_err(|e| ConsoleError::Console {
        message: format!("Failed to render profile: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;
    println!("{profile}");
    info!("Server said: {}", report.logout_message);

    Ok(())
}
