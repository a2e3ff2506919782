mod config;
mod error;
mod hooks;
mod outcome;
mod resolve;
