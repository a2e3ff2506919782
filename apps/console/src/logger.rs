//! Console logging: colored lines on stdout, plain lines with source
//! positions in `<log_dir>/storefront-console.log`.
//!
//! The level defaults per build profile and can be overridden with
//! `STOREFRONT_LOG=<off|error|warn|info|debug|trace>`.

use crate::error::ConsoleError;

use common::ErrorLocation;

use std::env;
use std::fmt;
use std::fs::File;
use std::panic::Location;
use std::path::Path;
use std::str::FromStr;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use humantime::format_rfc3339_seconds;
use log::{LevelFilter, debug, info};

pub const LOG_FILE_NAME: &str = "storefront-console.log";
pub const LEVEL_ENV: &str = "STOREFRONT_LOG";

#[cfg(debug_assertions)]
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

/// HTTP stack crates that flood debug output with connection chatter.
const QUIET_TARGETS: [(&str, LevelFilter); 3] = [
    ("hyper_util", LevelFilter::Warn),
    ("cookie_store", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
];

static INSTALL: Once = Once::new();
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Install the process-wide logger.
///
/// Only the first call installs anything; later calls return `Ok` and keep
/// the first logger.
///
/// # Errors
///
/// [`ConsoleError::Config`] for an unknown `STOREFRONT_LOG` value,
/// [`ConsoleError::Console`] if the log file cannot be opened or another
/// logger already owns the process.
pub fn initialize(log_dir: &Path) -> Result<(), ConsoleError> {
    let level = resolve_level(env::var(LEVEL_ENV).ok().as_deref())?;

    if INSTALLED.swap(true, Ordering::SeqCst) {
        debug!("Logger already installed, keeping the first one");
        return Ok(());
    }

    let mut outcome = Ok(());
    INSTALL.call_once(|| outcome = install(log_dir, level));
    outcome?;

    info!(
        "Logging at {level} to {}",
        log_dir.join(LOG_FILE_NAME).display()
    );
    Ok(())
}

/// Level from a raw `STOREFRONT_LOG` value. Unset or blank means
/// [`DEFAULT_LEVEL`].
#[track_caller]
pub fn resolve_level(raw: Option<&str>) -> Result<LevelFilter, ConsoleError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(DEFAULT_LEVEL);
    };

    LevelFilter::from_str(raw).map_err(|_| ConsoleError::Config {
        message: format!("{LEVEL_ENV}='{raw}' is not a log level"),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Open (append) the log file inside `log_dir`.
#[track_caller]
pub(crate) fn open_log_file(log_dir: &Path) -> Result<File, ConsoleError> {
    let path = log_dir.join(LOG_FILE_NAME);
    fern::log_file(&path).map_err(|e| ConsoleError::Console {
        message: format!("Cannot open log file {}: {e}", path.display()),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// One log line: `<timestamp> <level> <message> (<origin>)`.
fn write_line(
    out: FormatCallback<'_>,
    message: &fmt::Arguments<'_>,
    level: impl fmt::Display,
    origin: impl fmt::Display,
) {
    out.finish(format_args!(
        "{} {level} {message} ({origin})",
        format_rfc3339_seconds(SystemTime::now())
    ))
}

#[track_caller]
fn install(log_dir: &Path, level: LevelFilter) -> Result<(), ConsoleError> {
    let file = open_log_file(log_dir)?;
    let palette = ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Cyan)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let terminal = Dispatch::new()
        .format(move |out, message, record| {
            write_line(out, message, palette.color(record.level()), record.target())
        })
        .chain(std::io::stdout());

    let plain = Dispatch::new()
        .format(|out, message, record| {
            let origin = format!(
                "{}:{}",
                record.module_path().unwrap_or("?"),
                record.line().unwrap_or(0)
            );
            write_line(out, message, record.level(), origin)
        })
        .chain(file);

    QUIET_TARGETS
        .iter()
        .fold(Dispatch::new().level(level), |dispatch, (target, cap)| {
            dispatch.level_for(*target, *cap)
        })
        .chain(terminal)
        .chain(plain)
        .apply()
        .map_err(|e| ConsoleError::Console {
            message: format!("Another logger is already installed: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
}
