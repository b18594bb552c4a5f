//! Configuration module for mangobar.
//!
//! Settings live in `~/.config/mangobar/config.toml`. Every key is optional;
//! command-line flags take precedence over the file.

mod service;
mod types;
mod validation;

pub use service::{config_dir, default_config_path, load_config, read_config};
pub use types::AppConfig;
pub use validation::{ValidationWarning, validate_config};
