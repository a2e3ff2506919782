// Library exports for testing
// The binary (main.rs) imports these as well

pub mod error;
pub mod locations;
pub mod logger;
pub mod session_check;

#[cfg(test)]
mod tests;
