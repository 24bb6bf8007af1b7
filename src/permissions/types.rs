//! Permission types
//!
//! Core value types used by the resolver, authorizer and patch validator.

use crate::error::PermissionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace that matches every namespace when held
pub const GLOBAL_NAMESPACE: &str = "global";

/// Permission name that matches every name within its namespace when held
pub const WILDCARD: &str = "*";

/// Control directive that clears previously applied permissions during resolution
pub const CLEAR_DIRECTIVE: &str = "@clear";

/// Prefix marking a permission as a negator
pub const NEGATOR_PREFIX: char = '~';

/// Join a namespace and a permission name into a permission string
pub fn build(namespace: &str, name: &str) -> String {
    format!("{}.{}", namespace, name)
}

/// A single `namespace.name` permission, optionally negated
///
/// The canonical string form is `[~]<namespace>.<name>`. Permissions are
/// immutable once built; use [`Permission::negated`] and
/// [`Permission::without_negation`] to derive counterparts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permission {
    namespace: String,
    name: String,
    negated: bool,
}

impl Permission {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, negated: bool) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            negated,
        }
    }

    /// Parse a permission string
    ///
    /// Splits on the first `.`; without one the whole string is the name and the
    /// namespace is `global`. A leading `~` marks a negator. Returns `None` for
    /// empty input.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }

        let (head, name) = match s.split_once('.') {
            Some((namespace, name)) => (namespace, Some(name)),
            None => (s, None),
        };

        let negated = head.starts_with(NEGATOR_PREFIX);
        let head = head.strip_prefix(NEGATOR_PREFIX).unwrap_or(head);

        Some(match name {
            Some(name) => Self::new(head, name, negated),
            None => Self::new(GLOBAL_NAMESPACE, head, negated),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Name is `*`
    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD
    }

    /// Namespace is `global`
    pub fn is_global(&self) -> bool {
        self.namespace == GLOBAL_NAMESPACE
    }

    /// Name is the `@clear` directive
    pub fn is_clear(&self) -> bool {
        self.name == CLEAR_DIRECTIVE
    }

    /// Non-negated `global.*`, which grants everything
    pub fn is_superuser(&self) -> bool {
        !self.negated && self.is_global() && self.is_wildcard()
    }

    /// The negated counterpart of this permission
    pub fn negated(&self) -> Self {
        Self {
            negated: true,
            ..self.clone()
        }
    }

    /// The non-negated counterpart of this permission
    pub fn without_negation(&self) -> Self {
        Self {
            negated: false,
            ..self.clone()
        }
    }

    /// Canonical string form, used as the lookup key during resolution
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}", NEGATOR_PREFIX)?;
        }

        write!(f, "{}.{}", self.namespace, self.name)
    }
}

impl FromStr for Permission {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(PermissionError::Empty)
    }
}

impl TryFrom<&str> for Permission {
    type Error = PermissionError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Permission {
    type Error = PermissionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Permission> for String {
    fn from(perm: Permission) -> Self {
        perm.to_string()
    }
}

impl PartialEq<str> for Permission {
    fn eq(&self, other: &str) -> bool {
        Permission::parse(other).is_some_and(|other| *self == other)
    }
}

impl PartialEq<&str> for Permission {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Ordered collection of permissions
///
/// Order is meaningful: it is the display order and, for resolved sets, the
/// order in which permissions were first granted. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(Vec<Permission>);

impl PermissionSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse every string, failing on the first empty one
    pub fn from_strs<I, S>(perms: I) -> Result<Self, PermissionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        perms.into_iter().map(|p| p.as_ref().parse()).collect()
    }

    pub fn push(&mut self, perm: Permission) {
        self.0.push(perm);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Permission> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Permission] {
        &self.0
    }

    /// Exact membership (namespace, name and negation all equal)
    pub fn contains(&self, perm: &Permission) -> bool {
        self.0.contains(perm)
    }

    /// Whether this set grants `perm`, see [`crate::permissions::has_perm`]
    pub fn has(&self, perm: &Permission) -> bool {
        crate::permissions::has_perm(&self.0, perm)
    }

    /// Canonical strings joined by `sep`, in set order
    pub fn join(&self, sep: &str) -> String {
        self.to_strings().join(sep)
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(Permission::to_string).collect()
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join(", "))
    }
}

impl From<Vec<Permission>> for PermissionSet {
    fn from(perms: Vec<Permission>) -> Self {
        Self(perms)
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PermissionSet {
    type Item = Permission;
    type IntoIter = std::vec::IntoIter<Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::slice::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A staff position reduced to what resolution needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialStaffPosition {
    /// Position identifier
    pub id: String,
    /// Lower index means higher precedence (applied later)
    pub index: i32,
    /// Preset permissions of this position, in application order
    #[serde(default)]
    pub perms: PermissionSet,
}

impl PartialStaffPosition {
    pub fn new(id: impl Into<String>, index: i32, perms: PermissionSet) -> Self {
        Self {
            id: id.into(),
            index,
            perms,
        }
    }
}

/// Positions held by a staff member plus their direct overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffPermissions {
    #[serde(alias = "user_positions")]
    pub positions: Vec<PartialStaffPosition>,

    /// Applied last, as if held by a position with index 0
    #[serde(alias = "perm_overrides")]
    pub overrides: PermissionSet,
}

impl StaffPermissions {
    pub fn new(positions: Vec<PartialStaffPosition>, overrides: PermissionSet) -> Self {
        Self {
            positions,
            overrides,
        }
    }
}
