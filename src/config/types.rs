//! Configuration types for kittycat
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [staff]
//! overrides = ["~rpc.Claim"]
//!
//! [[staff.positions]]
//! id = "manager"
//! index = 2
//! perms = ["rpc.*", "~rpc.PremiumAdd"]
//!
//! [[staff.positions]]
//! id = "head_manager"
//! index = 1
//! perms = ["rpc.*"]
//! ```

use crate::permissions::StaffPermissions;
use serde::Deserialize;

/// Accepted values for `logging.level` and `--log-level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Positions and overrides of the staff member to evaluate
    pub staff: StaffPermissions,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
