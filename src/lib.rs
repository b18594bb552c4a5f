pub mod bridge;
pub mod cli;
pub mod config;
pub mod daemon;
pub mod display;
pub mod error;
pub mod mmsg;
pub mod tokio_runtime;

#[cfg(test)]
pub mod test_utils;
