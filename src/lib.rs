//! Kittycat
//!
//! Permission-string authorization with layered staff position resolution.
//!
//! ## Features
//!
//! - **Hierarchical permissions** of the form `namespace.name`, with `*` wildcards,
//!   the `global` namespace and `~` negators
//! - **Deterministic resolution** of indexed staff positions plus direct overrides
//!   into one ordered permission list
//! - **Patch validation** so a manager can only grant or revoke what they hold
//!
//! ## Permission Model
//!
//! ```text
//! positions (highest index first) → lower indexes → overrides (index 0)
//! ```
//!
//! Each layer is applied on top of the previous ones:
//! - negators replace grants, grants replace negators
//! - `ns.*` drops negators in `ns` applied by lower layers
//! - `ns.@clear` wipes `ns`, `global.@clear` wipes everything
//!
//! ## Example
//!
//! ```
//! use kittycat::permissions::{Permission, PermissionSet, has_perm};
//!
//! let held = PermissionSet::from_strs(["apps.*", "~apps.delete"]).unwrap();
//! let view = Permission::parse("apps.view").unwrap();
//! let delete = Permission::parse("apps.delete").unwrap();
//!
//! assert!(has_perm(held.as_slice(), &view));
//! assert!(!has_perm(held.as_slice(), &delete));
//! ```

pub mod config;
pub mod error;
pub mod permissions;

// Re-export main types
pub use config::{AppConfig, load_config};
pub use error::{AppError, ConfigError, PatchError, PermissionError, Result};
pub use permissions::{
    OrderedPermissionMap, PartialStaffPosition, PatchCheckResult, Permission, PermissionSet,
    StaffPermissions, check_patch, has_perm, resolve,
};
