//! Schema model for the versioned configuration.
//!
//! The on-disk document is tagged by an integer `version` discriminant.
//! Exactly one structural shape is valid per version; the tables here are
//! the single source of truth for which root fields each version requires.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A supported configuration schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum ConfigVersion {
    /// Original flat schema: all workspace concerns at the root.
    V1,
    /// Drops the legacy lookup flags in favor of a `commands` namespace.
    V2,
    /// Current schema: workspace concerns nested under `workspace`.
    V3,
}

/// The latest schema version. Canonical paths are expressed in this
/// version's vocabulary.
pub const CURRENT_VERSION: ConfigVersion = ConfigVersion::V3;

/// Root fields required by every version.
const REQUIRED_COMMON: &[&str] = &[
    "version",
    "useFMTitle",
    "useNoteTitleForLink",
    "mermaid",
    "usePrettyRefs",
    "useKatex",
    "site",
];

/// Additional root fields required at v1.
const REQUIRED_V1: &[&str] = &[
    "vaults",
    "journal",
    "scratch",
    "lookupConfirmVaultOnCreate",
    "lookup",
];

/// Additional root fields required at v2.
const REQUIRED_V2: &[&str] = &["vaults", "journal", "scratch", "commands"];

/// Additional root fields required at v3.
const REQUIRED_V3: &[&str] = &["commands", "workspace"];

impl ConfigVersion {
    /// Read the version discriminant off a config document.
    ///
    /// An absent, non-numeric, or out-of-range `version` field is treated
    /// as v1, matching the pre-versioning era when the field did not exist.
    pub fn of(config: &Value) -> Self {
        config
            .get("version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .and_then(|v| Self::try_from(v).ok())
            .unwrap_or(ConfigVersion::V1)
    }

    /// Integer discriminant stored in the `version` field.
    pub fn as_u32(self) -> u32 {
        match self {
            ConfigVersion::V1 => 1,
            ConfigVersion::V2 => 2,
            ConfigVersion::V3 => 3,
        }
    }

    /// Root fields a structurally complete config at this version carries.
    pub fn required_root_fields(self) -> Vec<&'static str> {
        let extra = match self {
            ConfigVersion::V1 => REQUIRED_V1,
            ConfigVersion::V2 => REQUIRED_V2,
            ConfigVersion::V3 => REQUIRED_V3,
        };
        REQUIRED_COMMON.iter().chain(extra.iter()).copied().collect()
    }
}

impl From<ConfigVersion> for u32 {
    fn from(v: ConfigVersion) -> u32 {
        v.as_u32()
    }
}

impl TryFrom<u32> for ConfigVersion {
    type Error = SchemaError;

    fn try_from(v: u32) -> Result<Self, SchemaError> {
        match v {
            1 => Ok(ConfigVersion::V1),
            2 => Ok(ConfigVersion::V2),
            3 => Ok(ConfigVersion::V3),
            other => Err(SchemaError::UnsupportedVersion(other)),
        }
    }
}

impl std::fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// Schema-level validation errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),

    #[error("config is not a mapping at the root")]
    NotAMapping,

    #[error("config v{version} is missing required field '{field}'")]
    MissingField { version: u32, field: &'static str },
}

/// Check that `config` carries every root field its version requires.
///
/// This is a boundary check for callers that want to fail fast (CLI, tests);
/// the resolver never uses it and never errors on structural gaps.
pub fn validate_shape(config: &Value) -> Result<(), SchemaError> {
    let map = config.as_object().ok_or(SchemaError::NotAMapping)?;
    let version = ConfigVersion::of(config);
    for field in version.required_root_fields() {
        if !map.contains_key(field) {
            return Err(SchemaError::MissingField {
                version: version.as_u32(),
                field,
            });
        }
    }
    Ok(())
}
