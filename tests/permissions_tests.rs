//! Permission integration tests
//!
//! Covers the public API end to end:
//! - Parsing and canonical formatting
//! - `has_perm` over held sets (global, wildcard and negator interaction)
//! - Resolution of positions and overrides, including `@clear` and the
//!   wildcard-over-negator rule
//! - Patch validation and its user-facing messages

use kittycat::permissions::{
    OrderedPermissionMap, PartialStaffPosition, PatchCheckResult, Permission, PermissionSet,
    StaffPermissions, check_patch, check_patch_str, has_perm, has_perm_str,
};
use rstest::rstest;

// =============================================================================
// Test Helpers
// =============================================================================

fn perm(s: &str) -> Permission {
    Permission::parse(s).unwrap()
}

fn set(list: &[&str]) -> PermissionSet {
    PermissionSet::from_strs(list).unwrap()
}

fn position(id: &str, index: i32, list: &[&str]) -> PartialStaffPosition {
    PartialStaffPosition::new(id, index, set(list))
}

fn resolve(positions: Vec<PartialStaffPosition>, overrides: &[&str]) -> Vec<String> {
    StaffPermissions::new(positions, set(overrides))
        .resolve()
        .to_strings()
}

// =============================================================================
// 1. Parsing
// =============================================================================

mod parsing {
    use super::*;

    #[rstest]
    #[case("rpc.test")]
    #[case("~rpc.test")]
    #[case("global.*")]
    #[case("~global.*")]
    #[case("apps.@clear")]
    #[case("apps.settings.write")]
    #[case("~apps.settings.*")]
    fn test_roundtrip(#[case] s: &str) {
        assert_eq!(perm(s).to_string(), s);
    }

    #[rstest]
    #[case("test", "global.test")]
    #[case("~test", "~global.test")]
    #[case("*", "global.*")]
    fn test_namespace_defaults_to_global(#[case] input: &str, #[case] canonical: &str) {
        assert_eq!(perm(input).to_string(), canonical);
    }

    #[test]
    fn test_empty_is_rejected() {
        assert!(Permission::parse("").is_none());
        assert!("".parse::<Permission>().is_err());
        assert!(Permission::try_from(String::new()).is_err());
    }

    #[test]
    fn test_fields() {
        let p = perm("~rpc.PremiumAdd");
        assert_eq!(p.namespace(), "rpc");
        assert_eq!(p.name(), "PremiumAdd");
        assert!(p.is_negated());
    }
}

// =============================================================================
// 2. has_perm
// =============================================================================

mod authorization {
    use super::*;

    #[rstest]
    #[case(&["global.*"], "test", true)]
    #[case(&["rpc.*"], "global.*", false)]
    #[case(&["global.test"], "rpc.test", true)]
    #[case(&["global.test"], "rpc.view_bot_queue", false)]
    #[case(&["global.*"], "rpc.view_bot_queue", true)]
    #[case(&["rpc.*"], "rpc.ViewBotQueue", true)]
    #[case(&["rpc.BotClaim"], "rpc.ViewBotQueue", false)]
    #[case(&["apps.*"], "rpc.ViewBotQueue", false)]
    #[case(&["apps.*"], "rpc.*", false)]
    #[case(&["apps.test"], "rpc.test", false)]
    #[case(&["apps.*"], "apps.test", true)]
    #[case(&["~apps.*"], "apps.test", false)]
    #[case(&["apps.*", "~apps.test"], "apps.test", false)]
    #[case(&["~apps.test", "apps.*"], "apps.test", false)]
    #[case(&["apps.test"], "apps.test", true)]
    #[case(&["apps.test", "apps.*"], "apps.test", true)]
    #[case(&["~apps.test", "global.*"], "apps.test", true)]
    #[case(&["~global.test", "apps.*"], "apps.test", false)]
    #[case(&[], "apps.test", false)]
    fn test_has_perm(#[case] held: &[&str], #[case] requested: &str, #[case] expected: bool) {
        assert_eq!(has_perm_str(held, requested), expected);
        assert_eq!(has_perm(set(held).as_slice(), &perm(requested)), expected);
    }

    #[test]
    fn test_global_superuser_grants_anything() {
        let held = set(&["~rpc.x", "~global.*", "global.*"]);
        for requested in ["rpc.x", "apps.*", "global.*", "anything"] {
            assert!(held.has(&perm(requested)));
        }
    }

    #[test]
    fn test_order_independent() {
        let forward = set(&["apps.*", "~apps.test", "rpc.view"]);
        let reversed: PermissionSet = forward.iter().rev().cloned().collect();

        for requested in ["apps.test", "apps.other", "rpc.view", "rpc.edit"] {
            assert_eq!(
                forward.has(&perm(requested)),
                reversed.has(&perm(requested)),
                "{}",
                requested
            );
        }
    }
}

// =============================================================================
// 3. Resolution
// =============================================================================

mod resolution {
    use super::*;

    #[test]
    fn test_overrides_are_resolved() {
        assert_eq!(resolve(vec![], &["rpc.test"]), vec!["rpc.test"]);
    }

    #[test]
    fn test_positions_sorted_by_index() {
        let positions = vec![
            position("test", 1, &["rpc.test"]),
            position("test2", 2, &["rpc.test2"]),
        ];
        assert_eq!(resolve(positions, &[]), vec!["rpc.test2", "rpc.test"]);
    }

    #[test]
    fn test_lower_index_grant_beats_negator() {
        let positions = vec![
            position("test", 1, &["rpc.test", "rpc.test2"]),
            position("test2", 2, &["~rpc.test", "~rpc.test3"]),
        ];
        assert_eq!(
            resolve(positions, &[]),
            vec!["~rpc.test3", "rpc.test", "rpc.test2"]
        );
    }

    #[test]
    fn test_wildcard_clears_lower_negators() {
        let positions = vec![
            position("test", 1, &["rpc.*"]),
            position("test2", 2, &["~rpc.test2", "~rpc.test3"]),
        ];
        assert_eq!(resolve(positions, &[]), vec!["rpc.*"]);
    }

    #[test]
    fn test_wildcard_keeps_higher_negators() {
        let positions = vec![
            position("test", 1, &["~rpc.test3", "~rpc.test2"]),
            position("test2", 2, &["rpc.*"]),
        ];
        assert_eq!(
            resolve(positions, &[]),
            vec!["rpc.*", "~rpc.test3", "~rpc.test2"]
        );
    }

    #[test]
    fn test_wildcard_does_not_touch_grants() {
        let positions = vec![
            position("head", 1, &["rpc.*"]),
            position("member", 2, &["rpc.view", "~rpc.edit"]),
        ];
        assert_eq!(resolve(positions, &[]), vec!["rpc.view", "rpc.*"]);
    }

    #[test]
    fn test_global_clear_wipes_everything_before_it() {
        let positions = vec![
            position("member", 2, &["rpc.test", "~apps.test"]),
            position("lead", 1, &["global.@clear", "apps.view"]),
        ];
        assert_eq!(resolve(positions, &["rpc.own"]), vec!["apps.view", "rpc.own"]);
    }

    #[test]
    fn test_namespace_clear_is_scoped() {
        let positions = vec![
            position("member", 2, &["apps.view", "~apps.delete", "rpc.test"]),
            position("lead", 1, &["apps.@clear"]),
        ];
        assert_eq!(resolve(positions, &[]), vec!["rpc.test"]);
    }

    #[test]
    fn test_override_negator_beats_position() {
        assert_eq!(
            resolve(vec![position("reviewer", 1, &["rpc.Claim"])], &["~rpc.Claim"]),
            vec!["~rpc.Claim"]
        );
    }

    #[test]
    fn test_equal_index_keeps_given_order() {
        let positions = vec![
            position("a", 1, &["rpc.test"]),
            position("b", 1, &["~rpc.test"]),
        ];
        assert_eq!(resolve(positions, &[]), vec!["~rpc.test"]);

        let positions = vec![
            position("b", 1, &["~rpc.test"]),
            position("a", 1, &["rpc.test"]),
        ];
        assert_eq!(resolve(positions, &[]), vec!["rpc.test"]);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let staff = StaffPermissions::new(
            vec![
                position("manager", 2, &["rpc.*", "~rpc.PremiumAdd", "apps.view"]),
                position("head_manager", 1, &["rpc.*", "~apps.delete"]),
                position("trial", 3, &["~rpc.Claim", "apps.*"]),
            ],
            set(&["~rpc.Reset"]),
        );

        let first = staff.resolve();
        let second = staff.resolve();
        assert_eq!(first, second);

        let mut scratch = OrderedPermissionMap::new();
        assert_eq!(staff.resolve_into(&mut scratch), first);
        assert_eq!(staff.resolve_into(&mut scratch), first);
    }

    #[test]
    fn test_resolved_set_authorizes() {
        let staff = StaffPermissions::new(
            vec![
                position("manager", 2, &["rpc.*", "~rpc.PremiumAdd"]),
                position("support", 3, &["apps.view"]),
            ],
            set(&[]),
        );
        let resolved = staff.resolve();

        assert!(resolved.has(&perm("rpc.Claim")));
        assert!(!resolved.has(&perm("rpc.PremiumAdd")));
        assert!(resolved.has(&perm("apps.view")));
        assert!(!resolved.has(&perm("apps.delete")));
    }
}

// =============================================================================
// 4. Patch validation
// =============================================================================

mod patches {
    use super::*;

    #[rstest]
    #[case(&["global.*"], &["rpc.test"], &["rpc.test", "rpc.test2"], true)]
    #[case(&["rpc.*"], &["global.*"], &["rpc.test", "rpc.test2"], false)]
    #[case(&["rpc.*"], &["rpc.test"], &["rpc.test", "rpc.test2"], true)]
    #[case(&["~rpc.test", "rpc.*"], &["rpc.foobar"], &["rpc.*"], false)]
    #[case(&["~rpc.test", "rpc.*"], &["~rpc.test"], &["rpc.*"], false)]
    #[case(&["~rpc.test", "rpc.*"], &["~rpc.test"], &["rpc.*", "~rpc.test", "~rpc.test2"], true)]
    #[case(&["~rpc.test", "rpc.*"], &["~rpc.test"], &["rpc.*", "~rpc.test2", "~rpc.test2"], false)]
    fn test_check_patch(
        #[case] manager: &[&str],
        #[case] current: &[&str],
        #[case] new: &[&str],
        #[case] allowed: bool,
    ) {
        let result = check_patch_str(manager, current, new).unwrap();
        assert_eq!(result.is_ok(), allowed, "{:?}", result);
    }

    #[test]
    fn test_manager_cannot_touch_unheld_namespace() {
        let result = check_patch(
            set(&["rpc.Claim"]).as_slice(),
            set(&["apps.view"]).as_slice(),
            set(&["~apps.view"]).as_slice(),
        );
        assert_eq!(
            result,
            PatchCheckResult::NoPermission {
                failing: perm("apps.view")
            }
        );
        assert_eq!(
            result.message().unwrap(),
            "You do not have permission to add this permission: apps.view"
        );
    }

    #[test]
    fn test_negated_manager_cannot_add_negator() {
        let result = check_patch(
            set(&["rpc.*", "~rpc.Claim"]).as_slice(),
            set(&[]).as_slice(),
            set(&["~rpc.Claim"]).as_slice(),
        );
        assert_eq!(
            result,
            PatchCheckResult::NoPermission {
                failing: perm("~rpc.Claim")
            }
        );
    }

    #[test]
    fn test_wildcard_message() {
        let result = check_patch(
            set(&["~rpc.test", "rpc.*"]).as_slice(),
            set(&["rpc.foobar"]).as_slice(),
            set(&["rpc.*"]).as_slice(),
        );
        assert_eq!(
            result.message().unwrap(),
            "You do not have permission to add wildcard permission rpc.* with negators due to lack of negator ~rpc.test"
        );
        assert!(result.into_result().is_err());
    }

    #[test]
    fn test_ok_has_no_message() {
        let result = check_patch(
            set(&["global.*"]).as_slice(),
            set(&[]).as_slice(),
            set(&["apps.*"]).as_slice(),
        );
        assert!(result.is_ok());
        assert!(result.message().is_none());
        assert!(result.into_result().is_ok());
    }
}
