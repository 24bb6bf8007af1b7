//! Permissions module
//!
//! Hierarchical `namespace.name` permission strings and the operations over them.
//!
//! ## Permission Model
//!
//! - `rpc.Claim` grants `Claim` in the `rpc` namespace
//! - `rpc.*` grants every permission in `rpc`
//! - `global.test` grants `test` in every namespace; `global.*` grants everything
//! - `~rpc.Claim` is a negator and revokes a matching grant
//! - `rpc.@clear` is a resolution directive, never a grantable permission
//!
//! ## Resolution
//!
//! A staff member holds several positions, each with an index (lower index wins)
//! and a list of permissions, plus direct overrides that win over every position.
//! [`StaffPermissions::resolve`] flattens them into one ordered [`PermissionSet`],
//! which [`has_perm`] and [`check_patch`] then consult.
//!
//! ```
//! use kittycat::permissions::{PartialStaffPosition, PermissionSet, StaffPermissions};
//!
//! let staff = StaffPermissions::new(
//!     vec![
//!         PartialStaffPosition::new("head_manager", 1, PermissionSet::from_strs(["rpc.*"]).unwrap()),
//!         PartialStaffPosition::new("manager", 2, PermissionSet::from_strs(["~rpc.PremiumAdd"]).unwrap()),
//!     ],
//!     PermissionSet::new(),
//! );
//!
//! assert_eq!(staff.resolve().to_strings(), vec!["rpc.*"]);
//! ```

pub mod authorizer;
pub mod ordered_map;
pub mod patch;
pub mod resolver;
pub mod types;

pub use authorizer::{has_perm, has_perm_str};
pub use ordered_map::OrderedPermissionMap;
pub use patch::{PatchCheckResult, check_patch, check_patch_str};
pub use resolver::{OVERRIDES_POSITION_ID, OVERRIDES_POSITION_INDEX, resolve};
pub use types::{
    CLEAR_DIRECTIVE, GLOBAL_NAMESPACE, NEGATOR_PREFIX, PartialStaffPosition, Permission,
    PermissionSet, StaffPermissions, WILDCARD, build,
};
