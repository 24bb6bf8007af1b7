//! Error types for kittycat
//!
//! This module defines the error hierarchy used throughout the crate.
//! Authorization outcomes are plain data (`bool`, `PatchCheckResult`); the
//! types here cover malformed input, configuration problems and the `Err`
//! form of a denied patch.

use crate::permissions::Permission;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid permission: {0}")]
    Permission(#[from] PermissionError),

    #[error("Patch denied: {0}")]
    Patch(#[from] PatchError),
}

/// Permission parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    #[error("permission string is empty")]
    Empty,
}

/// A patch the manager is not allowed to apply
///
/// The messages are user-facing and kept stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("You do not have permission to add this permission: {failing}")]
    NoPermission { failing: Permission },

    #[error(
        "You do not have permission to add wildcard permission {failing} with negators due to lack of negator {missing_negator}"
    )]
    LacksNegatorForWildcard {
        failing: Permission,
        missing_negator: Permission,
    },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, AppError>;
