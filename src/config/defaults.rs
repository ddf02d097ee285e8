//! Default generation for every supported schema version.
//!
//! A default config is composed from a version-independent common block plus
//! additive blocks that only exist for the versions that still need them.
//! The blocks are process-wide constants; composing a config clones them but
//! never rebuilds them, so repeated generations cannot drift apart.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use super::schema::ConfigVersion;

/// Fields shared by every version: feature flags plus publishing defaults.
static COMMON: Lazy<Value> = Lazy::new(|| {
    json!({
        "useFMTitle": true,
        "useNoteTitleForLink": true,
        "mermaid": true,
        "usePrettyRefs": true,
        "useKatex": true,
        "site": {
            "copyAssets": true,
            "siteHierarchies": ["root"],
            "siteRootDir": "docs",
            "usePrettyRefs": true,
            "title": "Dendron",
            "description": "Personal knowledge space",
            "siteLastModified": true,
            "gh_edit_branch": "main",
        },
    })
});

/// Legacy lookup-behavior flags that v2 dropped. Merged in for v1 only.
static OMITTED_FROM_V2: Lazy<Value> = Lazy::new(|| {
    json!({
        "lookupConfirmVaultOnCreate": false,
        "lookup": {
            "note": {
                "selectionType": "selectionExtract",
                "leaveTrace": false,
            },
        },
    })
});

/// Workspace-scoped root fields that v3 moved under `workspace`.
/// Merged in for v1 and v2.
static OMITTED_FROM_V3: Lazy<Value> = Lazy::new(|| {
    json!({
        "vaults": [],
        "journal": {
            "dailyDomain": "daily",
            "name": "journal",
            "dateFormat": "y.MM.dd",
            "addBehavior": "childOfDomain",
            "firstDayOfWeek": 1,
        },
        "scratch": {
            "name": "scratch",
            "dateFormat": "y.MM.dd.HHmmss",
            "addBehavior": "asOwnDomain",
        },
        "hooks": {
            "onCreate": [],
        },
    })
});

/// Default `commands` namespace (v2 and v3).
static COMMANDS: Lazy<Value> = Lazy::new(|| {
    json!({
        "lookup": {
            "note": {
                "selectionMode": "extract",
                "confirmVaultOnCreate": false,
                "leaveTrace": false,
            },
        },
    })
});

/// Default `workspace` namespace (v3 only).
static WORKSPACE: Lazy<Value> = Lazy::new(|| {
    json!({
        "vaults": [],
        "journal": {
            "dailyDomain": "daily",
            "name": "journal",
            "dateFormat": "y.MM.dd",
            "firstDayOfWeek": 1,
        },
        "scratch": {
            "name": "scratch",
            "dateFormat": "y.MM.dd.HHmmss",
        },
        "hooks": {
            "onCreate": [],
        },
    })
});

/// Merge the top-level entries of `block` into `root`, overwriting on clash.
fn extend(root: &mut Value, block: &Value) {
    if let (Some(root_map), Some(block_map)) = (root.as_object_mut(), block.as_object()) {
        for (key, value) in block_map {
            root_map.insert(key.clone(), value.clone());
        }
    }
}

/// Generate a structurally complete default config for `version`.
///
/// An omitted version means v1, the oldest schema, preserving the
/// expectations of callers that predate versioning. Pure: no I/O, no
/// process state, same output for the same input.
pub fn gen_default_config(version: Option<ConfigVersion>) -> Value {
    let version = version.unwrap_or(ConfigVersion::V1);
    let mut config = COMMON.clone();
    match version {
        ConfigVersion::V3 => {
            extend(&mut config, &json!({"commands": COMMANDS.clone()}));
            extend(&mut config, &json!({"workspace": WORKSPACE.clone()}));
        }
        ConfigVersion::V2 => {
            extend(&mut config, &OMITTED_FROM_V3);
            extend(&mut config, &json!({"commands": COMMANDS.clone()}));
        }
        ConfigVersion::V1 => {
            extend(&mut config, &OMITTED_FROM_V3);
            extend(&mut config, &OMITTED_FROM_V2);
        }
    }
    extend(&mut config, &json!({"version": version.as_u32()}));
    config
}
