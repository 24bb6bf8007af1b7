//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (KITTYCAT__*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::config::types::{AppConfig, LOG_LEVELS};
use crate::error::ConfigError;
use crate::permissions::OVERRIDES_POSITION_ID;
use config::{Config, Environment, File, FileFormat};
use std::collections::HashSet;
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "kittycat.toml",
    ".kittycat.toml",
    "~/.config/kittycat/config.toml",
];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // e.g. KITTYCAT__LOGGING__LEVEL maps to logging.level
    builder = builder.add_source(
        Environment::with_prefix("KITTYCAT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::Invalid {
            message: format!(
                "logging.level must be one of {}, got: {}",
                LOG_LEVELS.join(", "),
                config.logging.level
            ),
        });
    }

    let mut seen = HashSet::new();
    for (i, position) in config.staff.positions.iter().enumerate() {
        if position.id.is_empty() {
            return Err(ConfigError::Missing {
                field: format!("staff.positions[{}].id", i),
            });
        }

        if position.id == OVERRIDES_POSITION_ID {
            return Err(ConfigError::Invalid {
                message: format!(
                    "staff.positions[{}].id '{}' is reserved for overrides",
                    i, position.id
                ),
            });
        }

        if !seen.insert(position.id.as_str()) {
            return Err(ConfigError::Invalid {
                message: format!("duplicate position id '{}'", position.id),
            });
        }
    }

    Ok(())
}
