//! Domain-specific error types for mangobar.
//!
//! The bridge never surfaces these to its subscribers: every failure is turned
//! into "no data this cycle" at the boundary. They exist so the layers below
//! the bridge can report *why* a lookup produced nothing, which ends up in
//! debug logs.

use std::time::Duration;

use thiserror::Error;

/// Errors from invoking the `mmsg` control tool.
#[derive(Error, Debug)]
pub enum MmsgError {
    /// The binary could not be found on `$PATH` (or at the configured path).
    #[error("mmsg binary not found: {0}")]
    NotFound(String),

    /// The process did not finish within the allotted time.
    #[error("mmsg did not finish within {0:?}")]
    Timeout(Duration),

    /// The process exited unsuccessfully.
    #[error("mmsg exited with status {code:?}: {stderr}")]
    Exited { code: Option<i32>, stderr: String },

    /// Failed to spawn the process for a reason other than a missing binary.
    #[error("Failed to spawn mmsg: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Errors from parsing `mmsg` output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The tag count was not a positive integer.
    #[error("Invalid tag count: {0:?}")]
    InvalidTagCount(String),

    /// A tag bitmask was not a binary string that fits in 64 bits.
    #[error("Invalid tag mask: {0:?}")]
    InvalidMask(String),

    /// No usable `<monitor> tags <occupied> <active>` line was found.
    #[error("No matching tag line in output")]
    NoTagLine,
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config directory could not be determined.
    #[error("Config directory not found")]
    NoDirFound,

    /// Failed to read the config file.
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// Failed to parse the config file.
    #[error("Failed to parse config: {0}")]
    ParseFailed(#[source] toml::de::Error),
}
