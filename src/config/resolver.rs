//! Version-aware resolution of canonical config paths.
//!
//! Call sites address configuration using only the current schema's
//! vocabulary (e.g. `"workspace.journal"`); the resolver absorbs the
//! version archaeology. A `None` result for a non-required path is a
//! normal outcome meaning "not configured", never a fault.

use serde_json::Value;

use super::defaults::gen_default_config;
use super::schema::ConfigVersion;
use super::value::get_path;

/// Canonical (current-version) path to its pre-migration top-level key.
///
/// Membership in this table also defines the "required path" set: these
/// paths have no sensible empty value and must always resolve to something,
/// even from a config that predates the concept. Adding a migrated field is
/// a one-line entry here plus its default-value addition.
const LEGACY_PATHS: &[(&str, &str)] = &[
    ("workspace.journal", "journal"),
    ("workspace.scratch", "scratch"),
    ("workspace.vaults", "vaults"),
    ("workspace.hooks", "hooks"),
    ("commands.lookup", "lookup"),
];

/// Look up the legacy top-level key for a canonical path.
pub fn legacy_key(path: &str) -> Option<&'static str> {
    LEGACY_PATHS
        .iter()
        .find(|(canonical, _)| *canonical == path)
        .map(|(_, legacy)| *legacy)
}

/// Whether `path` must always resolve to a concrete value.
pub fn is_required_path(path: &str) -> bool {
    legacy_key(path).is_some()
}

/// Resolve a canonical dotted path against a config of any version.
///
/// 1. A direct structural hit wins — the fast path for current configs.
/// 2. v3: a required path falls back to the v3 default; anything else is
///    legitimately absent.
/// 3. v2: same branching against the v2 default, retrying the legacy key
///    for the workspace concerns the v2 shape keeps at the root.
/// 4. v1 (or unversioned): the path is mapped through the legacy table to
///    its flat top-level key and resolved with v1-style defaulting.
pub fn get_config(config: &Value, path: &str) -> Option<Value> {
    if let Some(found) = get_path(config, path) {
        return Some(found.clone());
    }

    match ConfigVersion::of(config) {
        ConfigVersion::V3 => {
            if is_required_path(path) {
                tracing::debug!(path, "required path absent from v3 config, defaulting");
                get_path(&gen_default_config(Some(ConfigVersion::V3)), path).cloned()
            } else {
                None
            }
        }
        ConfigVersion::V2 => {
            if is_required_path(path) {
                tracing::debug!(path, "required path absent from v2 config, defaulting");
                // The v2 default is still flat for workspace concerns, so a
                // canonical miss retries through the legacy key. Required
                // paths resolve to a concrete value on every version.
                let default = gen_default_config(Some(ConfigVersion::V2));
                get_path(&default, path)
                    .or_else(|| legacy_key(path).and_then(|key| default.get(key)))
                    .cloned()
            } else {
                None
            }
        }
        ConfigVersion::V1 => {
            let key = legacy_key(path)?;
            tracing::debug!(path, key, "resolving against flat v1 shape");
            get_prop(config, key)
        }
    }
}

/// Direct top-level field access with version-agnostic v1 defaulting.
///
/// Every missing top-level field is filled from `gen_default_config()`
/// (the no-argument v1 shape). This does not perform legacy-path
/// resolution; use [`get_config`] for canonical addressing.
pub fn get_prop(config: &Value, key: &str) -> Option<Value> {
    if let Some(found) = config.get(key) {
        return Some(found.clone());
    }
    gen_default_config(None).get(key).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_hit_wins_on_any_version() {
        let config = json!({
            "version": 3,
            "workspace": {"journal": {"name": "work"}},
        });
        assert_eq!(
            get_config(&config, "workspace.journal"),
            Some(json!({"name": "work"}))
        );
    }

    #[test]
    fn test_v1_legacy_fallback_returns_flat_field() {
        let config = json!({
            "version": 1,
            "journal": {"name": "j1", "dateFormat": "y.MM"},
        });
        assert_eq!(
            get_config(&config, "workspace.journal"),
            Some(json!({"name": "j1", "dateFormat": "y.MM"}))
        );
    }

    #[test]
    fn test_unversioned_config_treated_as_v1() {
        let config = json!({"journal": {"name": "old"}});
        assert_eq!(
            get_config(&config, "workspace.journal"),
            Some(json!({"name": "old"}))
        );
    }

    #[test]
    fn test_v1_missing_flat_field_gets_v1_default() {
        let config = json!({"version": 1});
        let resolved = get_config(&config, "workspace.journal").unwrap();
        assert_eq!(resolved["name"], "journal");
        assert_eq!(resolved["dailyDomain"], "daily");
    }

    #[test]
    fn test_v2_required_path_defaults_from_v2_shape() {
        let config = json!({"version": 2});
        let resolved = get_config(&config, "commands.lookup").unwrap();
        assert_eq!(
            resolved,
            gen_default_config(Some(ConfigVersion::V2))["commands"]["lookup"]
        );
    }

    #[test]
    fn test_v2_non_required_path_is_none() {
        let config = json!({"version": 2});
        assert_eq!(get_config(&config, "dev.enablePreview"), None);
    }

    #[test]
    fn test_v3_required_path_defaults_from_v3_shape() {
        let config = json!({"version": 3, "workspace": {}});
        let resolved = get_config(&config, "workspace.vaults").unwrap();
        assert_eq!(resolved, json!([]));
    }

    #[test]
    fn test_v3_non_required_path_is_none() {
        let config = json!({"version": 3});
        assert_eq!(get_config(&config, "dev.someUnknownFlag"), None);
    }

    #[test]
    fn test_get_prop_prefers_config_value() {
        let config = json!({"journal": {"name": "mine"}});
        assert_eq!(get_prop(&config, "journal"), Some(json!({"name": "mine"})));
    }

    #[test]
    fn test_get_prop_fills_from_v1_default() {
        let config = json!({});
        let journal = get_prop(&config, "journal").unwrap();
        assert_eq!(journal["name"], "journal");
        assert_eq!(get_prop(&config, "lookupConfirmVaultOnCreate"), Some(json!(false)));
    }

    #[test]
    fn test_get_prop_unknown_key_is_none() {
        assert_eq!(get_prop(&json!({}), "definitelyNotAField"), None);
    }

    #[test]
    fn test_hookless_v3_defaults_empty_hook_container() {
        let config = json!({"version": 3, "commands": {}, "workspace": {}});
        assert_eq!(
            get_config(&config, "workspace.hooks"),
            Some(json!({"onCreate": []}))
        );
    }

    #[test]
    fn test_hookless_v2_defaults_empty_hook_container() {
        let config = json!({"version": 2});
        assert_eq!(
            get_config(&config, "workspace.hooks"),
            Some(json!({"onCreate": []}))
        );
    }

    #[test]
    fn test_hookless_v1_defaults_empty_hook_container() {
        let config = json!({"version": 1});
        assert_eq!(
            get_config(&config, "workspace.hooks"),
            Some(json!({"onCreate": []}))
        );
    }

    #[test]
    fn test_v2_workspace_concern_resolves_via_legacy_key() {
        let config = json!({"version": 2});
        let resolved = get_config(&config, "workspace.journal").unwrap();
        assert_eq!(resolved["name"], "journal");
    }

    #[test]
    fn test_every_required_path_resolves_on_every_version() {
        for version in [ConfigVersion::V1, ConfigVersion::V2, ConfigVersion::V3] {
            let config = json!({"version": version.as_u32()});
            for (canonical, _) in LEGACY_PATHS {
                assert!(
                    get_config(&config, canonical).is_some(),
                    "required path '{canonical}' resolved to None on v{version}"
                );
            }
        }
    }

    #[test]
    fn test_required_path_set_matches_table() {
        assert!(is_required_path("workspace.journal"));
        assert!(is_required_path("commands.lookup"));
        assert!(!is_required_path("site"));
        assert!(!is_required_path("dev.someUnknownFlag"));
    }
}
