// The success/failure algebra every verb returns is std's Result/Option.
// These pin the laws the access layer relies on, against ApiResult itself.

use crate::error::{ApiError, ApiResult};

fn failure() -> ApiError {
    ApiError::decode("boom")
}

#[test]
fn given_ok_when_queried_then_is_ok_and_not_err() {
    let outcome: ApiResult<i32> = Ok(3);

    assert!(outcome.is_ok());
    assert!(!outcome.is_err());
}

#[test]
fn given_err_when_queried_then_is_err_and_not_ok() {
    let outcome: ApiResult<i32> = Err(failure());

    assert!(outcome.is_err());
    assert!(!outcome.is_ok());
}

#[test]
fn given_ok_when_mapped_then_function_applied() {
    let outcome: ApiResult<i32> = Ok(3);

    assert_eq!(outcome.map(|v| v * 2).unwrap(), 6);
}

/// **VALUE**: Mapping a failure must not call the function or lose the error.
#[test]
fn given_err_when_mapped_then_error_unchanged_and_function_not_called() {
    let outcome: ApiResult<i32> = Err(failure());
    let mut called = false;

    let mapped = outcome.map(|v| {
        called = true;
        v * 2
    });

    assert!(!called);
    assert!(matches!(mapped, Err(ApiError::Decode { ref message, .. }) if message == "boom"));
}

#[test]
fn given_results_when_folded_then_map_or_and_map_or_else_pick_branch() {
    let ok: ApiResult<i32> = Ok(3);
    let err: ApiResult<i32> = Err(failure());

    assert_eq!(ok.clone().map_or(0, |v| v + 1), 4);
    assert_eq!(err.clone().map_or(0, |v| v + 1), 0);
    assert_eq!(ok.map_or_else(|_| -1, |v| v), 3);
    assert_eq!(err.map_or_else(|e| e.error_category().len() as i32, |v| v), 6);
}

#[test]
fn given_results_when_unwrapped_with_default_then_default_only_on_err() {
    let ok: ApiResult<&str> = Ok("value");
    let err: ApiResult<&str> = Err(failure());

    assert_eq!(ok.clone().unwrap_or("default"), "value");
    assert_eq!(err.clone().unwrap_or("default"), "default");
    assert_eq!(err.unwrap_or_else(|_| "computed"), "computed");
    assert_eq!(ok.ok(), Some("value"));
}

#[test]
fn given_some_when_mapped_then_function_applied() {
    assert_eq!(Some(2).map(|v| v + 1), Some(3));
}

#[test]
fn given_none_when_mapped_then_stays_none() {
    let none: Option<i32> = None;

    assert_eq!(none.map(|v| v + 1), None);
}

#[test]
fn given_options_when_folded_then_default_only_on_none() {
    let none: Option<i32> = None;

    assert_eq!(Some(2).map_or(0, |v| v * 10), 20);
    assert_eq!(none.map_or(0, |v| v * 10), 0);
    assert_eq!(none.unwrap_or_else(|| 9), 9);
    assert!(Some(1).is_some() && none.is_none());
}

#[test]
fn given_options_when_converted_with_ok_or_then_none_becomes_the_error() {
    let some: ApiResult<i32> = Some(5).ok_or_else(failure);
    let none: ApiResult<i32> = None.ok_or(failure());

    assert_eq!(some.unwrap(), 5);
    assert_eq!(none.unwrap_err().error_category(), "decode");
}

#[test]
#[should_panic]
fn given_err_when_unwrapped_then_panics() {
    let outcome: ApiResult<i32> = Err(failure());
    let _ = outcome.unwrap();
}
