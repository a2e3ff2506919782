// Only one test installs the global logger; the process can hold one.

use crate::error::ConsoleError;
use crate::logger::{DEFAULT_LEVEL, LOG_FILE_NAME, initialize, open_log_file, resolve_level};

use std::path::PathBuf;

use log::LevelFilter;
use tempfile::TempDir;

/// **VALUE**: Calling initialize() twice neither panics nor fails.
///
/// **BUG THIS CATCHES**: Without the install guard fern fails on the second
/// `apply()` because a global logger is already set.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    let dir = TempDir::new().unwrap();

    let first = initialize(dir.path());
    let second = initialize(dir.path());

    assert!(first.is_ok(), "First initialization should succeed");
    assert!(second.is_ok(), "Second initialization should be a no-op");
    assert!(dir.path().join(LOG_FILE_NAME).exists());
}

/// **BUG THIS CATCHES**: Unwrapping the `fern::log_file` result would panic at
/// startup on an unwritable log directory instead of reporting it.
#[test]
fn given_unwritable_log_dir_when_opening_log_file_then_console_error() {
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    let result = open_log_file(&invalid_dir);

    assert!(matches!(result, Err(ConsoleError::Console { .. })));
}

#[test]
fn given_no_override_when_resolving_level_then_profile_default() {
    assert_eq!(resolve_level(None).unwrap(), DEFAULT_LEVEL);
    assert_eq!(resolve_level(Some("  ")).unwrap(), DEFAULT_LEVEL);
}

#[test]
fn given_level_name_in_any_case_when_resolving_level_then_parsed() {
    assert_eq!(resolve_level(Some("trace")).unwrap(), LevelFilter::Trace);
    assert_eq!(resolve_level(Some(" WARN ")).unwrap(), LevelFilter::Warn);
    assert_eq!(resolve_level(Some("off")).unwrap(), LevelFilter::Off);
}

/// **BUG THIS CATCHES**: Silently falling back on a typo hides that the
/// requested verbosity was never applied.
#[test]
fn given_unknown_level_when_resolving_level_then_config_error() {
    let error = resolve_level(Some("loud")).unwrap_err();

    match error {
        ConsoleError::Config { message, .. } => assert!(message.contains("STOREFRONT_LOG")),
        other => panic!("Expected Config error, got {other:?}"),
    }
}
