//! Staff permission resolver
//!
//! Flattens a staff member's positions and overrides into one ordered
//! permission set. Layers are applied from lowest to highest precedence so
//! that later layers simply overwrite earlier ones:
//! 1. Positions, highest `index` first
//! 2. Positions with equal index, in the order given
//! 3. Overrides, as a synthetic position with index 0
//!
//! Within a layer, each permission is applied in listed order:
//! - `<namespace>.@clear` removes everything in that namespace (`global` clears all)
//! - a negator replaces an existing grant of the same permission
//! - a grant replaces an existing negator of the same permission
//! - a `<namespace>.*` grant also drops every negator already applied in its namespace
//!
//! The output keeps the order in which entries were first inserted.

use crate::permissions::ordered_map::OrderedPermissionMap;
use crate::permissions::types::{Permission, PermissionSet, StaffPermissions};
use tracing::{debug, trace};

/// Id of the synthetic position carrying the overrides
pub const OVERRIDES_POSITION_ID: &str = "perm_overrides";

/// Index of the synthetic overrides position
pub const OVERRIDES_POSITION_INDEX: i32 = 0;

/// Borrowed view of a position during resolution
struct Layer<'a> {
    id: &'a str,
    index: i32,
    perms: &'a PermissionSet,
}

impl StaffPermissions {
    /// Resolve into a fresh permission set
    pub fn resolve(&self) -> PermissionSet {
        let mut applied = OrderedPermissionMap::new();
        self.resolve_into(&mut applied)
    }

    /// Resolve using a caller-supplied scratch map
    ///
    /// The map is cleared first and holds the resolved entries afterwards. It
    /// must not be shared with another resolution while this runs.
    pub fn resolve_into(&self, applied: &mut OrderedPermissionMap) -> PermissionSet {
        applied.clear();

        let mut layers: Vec<Layer<'_>> = self
            .positions
            .iter()
            .map(|pos| Layer {
                id: &pos.id,
                index: pos.index,
                perms: &pos.perms,
            })
            .collect();

        layers.push(Layer {
            id: OVERRIDES_POSITION_ID,
            index: OVERRIDES_POSITION_INDEX,
            perms: &self.overrides,
        });

        // Stable: equal indexes keep their given order
        layers.sort_by(|a, b| b.index.cmp(&a.index));

        debug!(
            positions = self.positions.len(),
            overrides = self.overrides.len(),
            "Resolving staff permissions"
        );

        for layer in &layers {
            trace!(position = layer.id, index = layer.index, "Applying position");
            for perm in layer.perms {
                apply(applied, perm);
            }
        }

        let resolved = applied.to_permission_set();
        debug!(resolved = %resolved, "Resolved staff permissions");
        resolved
    }
}

/// Resolve `staff` into a fresh permission set
pub fn resolve(staff: &StaffPermissions) -> PermissionSet {
    staff.resolve()
}

fn apply(applied: &mut OrderedPermissionMap, perm: &Permission) {
    if perm.is_clear() {
        if perm.is_global() {
            trace!("Clearing all permissions");
            applied.clear();
        } else {
            trace!(namespace = perm.namespace(), "Clearing namespace");
            applied.retain(|p| p.namespace() != perm.namespace());
        }
        return;
    }

    if perm.is_negated() {
        let granted = perm.without_negation();
        if applied.delete(&granted).is_some() {
            trace!(permission = %perm, "Negator replaced grant");
            applied.set(perm.clone());
        } else if !applied.contains(perm) {
            applied.set(perm.clone());
        }
        return;
    }

    // A wildcard grant at this precedence overrides negators applied by
    // lower positions in the same namespace
    if perm.is_wildcard() {
        trace!(permission = %perm, "Wildcard clears namespace negators");
        applied.retain(|p| !(p.is_negated() && p.namespace() == perm.namespace()));
    }

    let negator = perm.negated();
    if applied.delete(&negator).is_some() {
        trace!(permission = %perm, "Grant replaced negator");
        applied.set(perm.clone());
    } else if !applied.contains(perm) {
        applied.set(perm.clone());
    }
}
