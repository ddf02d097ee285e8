//! Lifecycle hook registry
//!
//! Version-aware add/remove operations over the hook lists embedded in the
//! config. Hooks live under `workspace.hooks` on v3 and root-level `hooks`
//! on earlier versions; both operations select the container by version the
//! same way the resolver does. This module manages the registry only —
//! script execution belongs to an external collaborator.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::config::schema::ConfigVersion;

/// Lifecycle event a hook is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookLifecycle {
    /// Runs when a note is created.
    #[serde(rename = "onCreate")]
    OnCreate,
}

impl HookLifecycle {
    /// Key of this lifecycle's list inside the hook container.
    pub fn as_str(self) -> &'static str {
        match self {
            HookLifecycle::OnCreate => "onCreate",
        }
    }
}

impl std::fmt::Display for HookLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HookLifecycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onCreate" => Ok(HookLifecycle::OnCreate),
            other => Err(format!("unknown hook lifecycle: '{other}'")),
        }
    }
}

/// Supported hook script kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
    /// JavaScript hook script.
    #[default]
    Js,
}

impl HookKind {
    /// File extension for scripts of this kind.
    pub fn extension(self) -> &'static str {
        match self {
            HookKind::Js => "js",
        }
    }
}

impl std::str::FromStr for HookKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "js" => Ok(HookKind::Js),
            other => Err(format!("unknown hook kind: '{other}'")),
        }
    }
}

/// A registered hook: a script id plus its kind.
///
/// The id is unique within its lifecycle list by convention; insertion does
/// not enforce uniqueness, callers are responsible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookEntry {
    /// Script identifier, also the script file's base name.
    pub id: String,

    /// Script kind.
    #[serde(rename = "type")]
    pub kind: HookKind,
}

impl HookEntry {
    /// Convenience constructor.
    pub fn new(id: impl Into<String>, kind: HookKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// Result of checking a hook entry against the workspace's script tree.
///
/// A missing script is a minor finding so callers can warn and continue;
/// it is never an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookValidation {
    /// Whether the expected script file exists.
    pub valid: bool,
    /// Human-readable explanation when invalid.
    pub error: Option<String>,
}

/// Borrow the hook container for `config`'s version, creating it if needed.
///
/// The container is normalized to `{"onCreate": []}` on creation, even when
/// the subsequent append targets a different lifecycle. Intentional
/// bootstrap behavior: every add leaves the container in a known shape.
fn hook_container<'a>(config: &'a mut Value, version: ConfigVersion) -> Option<&'a mut Map<String, Value>> {
    let parent = match version {
        ConfigVersion::V3 => config
            .as_object_mut()?
            .entry("workspace")
            .or_insert_with(|| json!({})),
        _ => config,
    };
    let container = parent
        .as_object_mut()?
        .entry("hooks")
        .or_insert_with(|| json!({ HookLifecycle::OnCreate.as_str(): [] }));
    container.as_object_mut()
}

/// Append `entry` to the `lifecycle` list, selecting the container by the
/// config's version. Mutates `config` in place.
pub fn add_to_config(config: &mut Value, lifecycle: HookLifecycle, entry: HookEntry) {
    let version = ConfigVersion::of(config);
    let Some(container) = hook_container(config, version) else {
        return;
    };
    let list = container
        .entry(lifecycle.as_str())
        .or_insert_with(|| json!([]));
    if let Some(list) = list.as_array_mut() {
        tracing::debug!(id = %entry.id, %lifecycle, "registering hook");
        list.push(json!({"id": entry.id, "type": entry.kind.extension()}));
    }
}

/// Remove every entry whose id matches `hook_id` from the `lifecycle` list.
///
/// Removing an id that is not registered is a no-op.
pub fn remove_from_config(config: &mut Value, lifecycle: HookLifecycle, hook_id: &str) {
    let version = ConfigVersion::of(config);
    let Some(container) = hook_container(config, version) else {
        return;
    };
    let list = container
        .entry(lifecycle.as_str())
        .or_insert_with(|| json!([]));
    if let Some(list) = list.as_array_mut() {
        list.retain(|entry| entry.get("id").and_then(Value::as_str) != Some(hook_id));
    }
}

/// Path where `entry`'s script is expected to live.
pub fn hook_script_path(ws_root: &Path, entry: &HookEntry) -> PathBuf {
    ws_root
        .join("hooks")
        .join(format!("{}.{}", entry.id, entry.kind.extension()))
}

/// Check that the script file for a registered hook exists on disk.
pub fn validate_hook(ws_root: &Path, entry: &HookEntry) -> HookValidation {
    let script = hook_script_path(ws_root, entry);
    if script.exists() {
        HookValidation {
            valid: true,
            error: None,
        }
    } else {
        HookValidation {
            valid: false,
            error: Some(format!(
                "hook script not found: {}",
                script.display()
            )),
        }
    }
}
