//! Insertion-ordered permission map
//!
//! Maps a permission's canonical string to the permission while remembering the
//! order in which keys were first inserted. Resolution output is read from that
//! order, so removals must never reorder the surviving entries.

use crate::permissions::types::{Permission, PermissionSet};
use std::collections::HashMap;

/// Map from canonical permission string to permission, iterated in insertion order
#[derive(Debug, Clone, Default)]
pub struct OrderedPermissionMap {
    entries: HashMap<String, Permission>,
    order: Vec<String>,
}

impl OrderedPermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, perm: &Permission) -> Option<&Permission> {
        self.entries.get(&perm.key())
    }

    pub fn contains(&self, perm: &Permission) -> bool {
        self.entries.contains_key(&perm.key())
    }

    /// Insert or overwrite by key. New keys are appended to the order; an
    /// overwritten key keeps its slot. Returns the previous value.
    pub fn set(&mut self, perm: Permission) -> Option<Permission> {
        let key = perm.key();
        let previous = self.entries.insert(key.clone(), perm);
        if previous.is_none() {
            self.order.push(key);
        }
        self.debug_check();
        previous
    }

    /// Remove by key, dropping exactly one slot from the order
    pub fn delete(&mut self, perm: &Permission) -> Option<Permission> {
        let key = perm.key();
        let removed = self.entries.remove(&key)?;
        if let Some(pos) = self.order.iter().position(|k| *k == key) {
            self.order.remove(pos);
        }
        self.debug_check();
        Some(removed)
    }

    /// Keep only the entries matching `keep`, preserving the order of survivors
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Permission) -> bool,
    {
        let entries = &mut self.entries;
        self.order.retain(|key| {
            let kept = entries.get(key).is_some_and(&mut keep);
            if !kept {
                entries.remove(key);
            }
            kept
        });
        self.debug_check();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Permissions in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.order.iter().filter_map(|key| self.entries.get(key))
    }

    /// Copy the current order into a fresh set
    pub fn to_permission_set(&self) -> PermissionSet {
        self.iter().cloned().collect()
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert_eq!(
            self.order.len(),
            self.entries.len(),
            "ordered permission map out of sync"
        );
    }
}
