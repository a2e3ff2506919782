//! Where the console keeps its config and logs.

use crate::error::ConsoleError;

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "storefront";
const LOG_DIR_NAME: &str = "logs";

/// `<platform config dir>/storefront`, e.g. `~/.config/storefront` on Linux.
#[track_caller]
pub fn config_dir() -> Result<PathBuf, ConsoleError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| ConsoleError::Console {
            message: "No config directory for this platform".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// `<platform local data dir>/storefront/logs`.
#[track_caller]
pub fn log_dir() -> Result<PathBuf, ConsoleError> {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(LOG_DIR_NAME))
        .ok_or_else(|| ConsoleError::Console {
            message: "No local data directory for this platform".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}

#[track_caller]
pub fn ensure_dir(dir: &Path) -> Result<(), ConsoleError> {
    create_dir_all(dir).map_err(|e| ConsoleError::Console {
        message: format!("Failed to create directory {}: {e}", dir.display()),
        location: ErrorLocation::from(Location::caller()),
    })
}
