pub mod api;
pub mod config;

pub use api::ApiError;
pub use config::ConfigError;

/// Outcome of every client verb: the typed payload or an [`ApiError`].
///
/// The success/failure algebra (`map`, `map_or`, `map_or_else`,
/// `unwrap_or`, `unwrap_or_else`, `ok`, `is_ok`, `is_err`) is the standard
/// library's; `unwrap` on the wrong variant panics and is reserved for
/// call sites where the variant is known.
pub type ApiResult<T> = Result<T, ApiError>;
