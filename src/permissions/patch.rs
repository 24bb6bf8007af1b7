//! Patch validation
//!
//! Decides whether a manager may change a permission set from `current` to
//! `new`. Every added or removed permission must be one the manager holds
//! (negation stripped), and a manager granting a wildcard must carry their own
//! negators for that namespace over into the new set.

use crate::error::{PatchError, PermissionError};
use crate::permissions::authorizer::has_perm;
use crate::permissions::types::{Permission, PermissionSet};
use std::collections::HashSet;
use tracing::debug;

/// Outcome of [`check_patch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchCheckResult {
    /// The change is within the manager's authority
    Ok,
    /// The manager does not hold `failing`
    NoPermission { failing: Permission },
    /// `failing` is a wildcard, and the new set drops the manager's `missing_negator`
    LacksNegatorForWildcard {
        failing: Permission,
        missing_negator: Permission,
    },
}

impl PatchCheckResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, PatchCheckResult::Ok)
    }

    pub fn into_result(self) -> Result<(), PatchError> {
        match self {
            PatchCheckResult::Ok => Ok(()),
            PatchCheckResult::NoPermission { failing } => {
                Err(PatchError::NoPermission { failing })
            }
            PatchCheckResult::LacksNegatorForWildcard {
                failing,
                missing_negator,
            } => Err(PatchError::LacksNegatorForWildcard {
                failing,
                missing_negator,
            }),
        }
    }

    /// User-facing denial message; `None` when the change is allowed
    pub fn message(&self) -> Option<String> {
        self.clone().into_result().err().map(|e| e.to_string())
    }
}

/// Check whether `manager_perms` may turn `current_perms` into `new_perms`
///
/// `manager_perms` should be the manager's resolved permissions.
pub fn check_patch(
    manager_perms: &[Permission],
    current_perms: &[Permission],
    new_perms: &[Permission],
) -> PatchCheckResult {
    for perm in changed(current_perms, new_perms) {
        if !has_perm(manager_perms, &perm.without_negation()) {
            debug!(permission = %perm, "Patch touches a permission the manager lacks");
            return PatchCheckResult::NoPermission {
                failing: perm.clone(),
            };
        }

        if perm.is_wildcard() {
            let missing = manager_perms.iter().find(|held| {
                held.is_negated()
                    && held.namespace() == perm.namespace()
                    && !new_perms.contains(held)
            });

            if let Some(negator) = missing {
                debug!(
                    permission = %perm,
                    negator = %negator,
                    "Wildcard patch drops a manager negator"
                );
                return PatchCheckResult::LacksNegatorForWildcard {
                    failing: perm.clone(),
                    missing_negator: negator.clone(),
                };
            }
        }
    }

    PatchCheckResult::Ok
}

/// [`check_patch`] over permission strings
pub fn check_patch_str<S: AsRef<str>>(
    manager_perms: &[S],
    current_perms: &[S],
    new_perms: &[S],
) -> Result<PatchCheckResult, PermissionError> {
    let manager = PermissionSet::from_strs(manager_perms)?;
    let current = PermissionSet::from_strs(current_perms)?;
    let new = PermissionSet::from_strs(new_perms)?;

    Ok(check_patch(
        manager.as_slice(),
        current.as_slice(),
        new.as_slice(),
    ))
}

/// Symmetric difference: removals (in `current` order) then additions (in
/// `new` order), each distinct permission once
fn changed<'a>(current: &'a [Permission], new: &'a [Permission]) -> Vec<&'a Permission> {
    let current_set: HashSet<&Permission> = current.iter().collect();
    let new_set: HashSet<&Permission> = new.iter().collect();
    let mut seen = HashSet::new();

    current
        .iter()
        .filter(|p| !new_set.contains(p))
        .chain(new.iter().filter(|p| !current_set.contains(p)))
        .filter(|p| seen.insert(*p))
        .collect()
}
