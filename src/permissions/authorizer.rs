//! Permission checks against a held set

use crate::permissions::types::Permission;

/// Check whether `held` grants `requested`
///
/// `global.*` grants everything. Otherwise a held permission matches when its
/// namespace equals the requested one (or is `global`) and its name equals the
/// requested one (or is `*`). The request is granted if anything matched and
/// none of the matches is a negator. The order of `held` does not matter.
///
/// Expects an already resolved set.
pub fn has_perm(held: &[Permission], requested: &Permission) -> bool {
    let mut matched = false;
    let mut negated_match = false;

    for perm in held {
        if perm.is_superuser() {
            return true;
        }

        let namespace_matches = perm.namespace() == requested.namespace() || perm.is_global();
        let name_matches = perm.is_wildcard() || perm.name() == requested.name();

        if namespace_matches && name_matches {
            matched = true;
            if perm.is_negated() {
                negated_match = true;
            }
        }
    }

    matched && !negated_match
}

/// [`has_perm`] over permission strings
///
/// Empty held entries are ignored; an empty request is never granted.
pub fn has_perm_str<S: AsRef<str>>(held: &[S], requested: &str) -> bool {
    let Some(requested) = Permission::parse(requested) else {
        return false;
    };

    let held: Vec<Permission> = held
        .iter()
        .filter_map(|p| Permission::parse(p.as_ref()))
        .collect();

    has_perm(&held, &requested)
}
