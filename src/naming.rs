//! Naming conventions for generated Terraform resources.
//!
//! Auto Scaling Group names in this fleet mirror deployment paths
//! (`team/service.variant`), which are not valid Terraform identifiers or
//! DNS labels. Both derivations below are pure and total over any input.

/// Terraform module identifier derived from a raw group name.
///
/// `/` and `.` become `_`.
pub fn module_name(raw: &str) -> String {
    raw.replace(['/', '.'], "_")
}

/// DNS-label-safe cluster name derived from a raw group name.
///
/// `/` and `.` become `-`. Used as the module path segment in import
/// commands and as the cluster tag value.
pub fn cluster_name(raw: &str) -> String {
    raw.replace(['/', '.'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_name_replaces_separators() {
        assert_eq!(module_name("team/svc-1"), "team_svc-1");
        assert_eq!(module_name("team/svc.blue"), "team_svc_blue");
        assert_eq!(module_name("plain"), "plain");
    }

    #[test]
    fn test_cluster_name_replaces_separators() {
        assert_eq!(cluster_name("team/svc-1"), "team-svc-1");
        assert_eq!(cluster_name("team/svc.blue"), "team-svc-blue");
        assert_eq!(cluster_name("plain"), "plain");
    }

    #[test]
    fn test_derived_names_contain_no_separators() {
        for raw in ["a/b/c", "a.b.c", "a/b.c/d"] {
            assert!(!module_name(raw).contains(['/', '.']));
            assert!(!cluster_name(raw).contains(['/', '.']));
        }
    }

    // "app/v1" and "app.v1" collide under both derivations. Accepted:
    // the fleet never mixes the two separator styles for the same path.
    #[test]
    fn test_separator_collision_is_accepted() {
        assert_eq!(module_name("app/v1"), module_name("app.v1"));
        assert_eq!(cluster_name("app/v1"), cluster_name("app.v1"));
    }

    #[test]
    fn test_empty_name_is_valid() {
        assert_eq!(module_name(""), "");
        assert_eq!(cluster_name(""), "");
    }
}
