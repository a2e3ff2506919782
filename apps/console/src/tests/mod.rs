mod error;
mod logger;
mod session_check;
