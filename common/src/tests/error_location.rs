use crate::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures file, line, and column.
///
/// **WHY THIS MATTERS**: Every `ApiError` and `ConfigError` carries a location. If capture
/// breaks, all error messages lose the `[file:line:column]` suffix developers rely on.
#[test]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN/WHEN: Capturing the current call site
    let expected_line = line!() + 1;
    let location = ErrorLocation::from(Location::caller());

    // THEN: File, line, and column are populated
    assert!(location.file.contains("error_location.rs"));
    assert_eq!(location.line, expected_line);
    assert!(location.column > 0);
}

/// **VALUE**: Verifies the Display format is `[file:line:column]`.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    let location = ErrorLocation::from(Location::caller());

    let formatted = format!("{}", location);

    assert!(formatted.starts_with('['));
    assert!(formatted.ends_with(']'));
    assert!(formatted.contains("error_location.rs"));
    assert!(formatted.contains(&location.line.to_string()));
    assert_eq!(formatted.matches(':').count(), 2);
}

/// **VALUE**: Proves `#[track_caller]` propagation reports each call site separately.
///
/// **BUG THIS CATCHES**: Would catch a constructor that forgets `#[track_caller]`,
/// which makes every error point at the constructor instead of the failing call.
#[test]
fn given_multiple_call_sites_when_capturing_location_then_each_has_unique_line() {
    #[track_caller]
    fn capture_location() -> ErrorLocation {
        ErrorLocation::from(Location::caller())
    }

    let first = capture_location();
    let second = capture_location();

    assert_eq!(first.file, second.file);
    assert_eq!(first.line + 1, second.line);
}
