//! Configuration module
//!
//! Loads the staff permissions and logging settings used by the `kittycat`
//! binary from TOML files and `KITTYCAT__*` environment variables.

pub mod loader;
pub mod types;

pub use loader::{load_config, load_config_from_str};
pub use types::*;
