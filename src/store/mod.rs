//! Config file store
//!
//! Read/create/write/backup operations for the `dendron.yml` document at a
//! workspace root. The store holds no state beyond the root path: every
//! operation re-reads or re-derives from its inputs, and persistence only
//! happens on explicit `write`/`create_backup` calls. Callers serialize
//! concurrent read-modify-write cycles themselves.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::config::defaults::gen_default_config;
use crate::config::value::shallow_merge;

/// Config file name inside a workspace root.
pub const CONFIG_FILE: &str = "dendron.yml";

/// Timestamp layout used in backup file names (`2024.01.02.030405006`).
const BACKUP_STAMP_FORMAT: &str = "%Y.%m.%d.%H%M%S%3f";

/// Errors from file-level config operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),
}

/// File-level operations over one workspace's config.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    ws_root: PathBuf,
}

impl ConfigStore {
    /// Create a store rooted at `ws_root`. No I/O happens here.
    pub fn new(ws_root: impl Into<PathBuf>) -> Self {
        Self {
            ws_root: ws_root.into(),
        }
    }

    /// Workspace root this store operates on.
    pub fn ws_root(&self) -> &Path {
        &self.ws_root
    }

    /// Canonical path of the config file.
    pub fn config_path(&self) -> PathBuf {
        self.ws_root.join(CONFIG_FILE)
    }

    /// Whether a config file currently exists.
    pub fn exists(&self) -> bool {
        self.config_path().exists()
    }

    /// Read the config and fill in defaults, creating the file if absent.
    ///
    /// The provisional document is caller `defaults` shallow-overridden by
    /// `gen_default_config()`. If no file exists it is persisted and
    /// returned; otherwise the on-disk document shallow-merges over the
    /// provisional one (disk wins at the top level, nested collections
    /// replaced wholesale).
    pub fn get_or_create(&self, defaults: Option<&Value>) -> Result<Value, StoreError> {
        let provisional = shallow_merge(
            defaults.cloned().unwrap_or(Value::Null),
            gen_default_config(None),
        );
        if !self.exists() {
            tracing::debug!(path = %self.config_path().display(), "creating config file");
            self.write(&provisional)?;
            return Ok(provisional);
        }
        let on_disk = self.get_raw()?;
        Ok(shallow_merge(provisional, on_disk))
    }

    /// Read the on-disk config with no defaulting.
    ///
    /// Use this when "absent" must be distinguishable from "defaulted".
    /// A missing file is an error here, unlike [`Self::get_or_create`].
    pub fn get_raw(&self) -> Result<Value, StoreError> {
        let path = self.config_path();
        if !path.exists() {
            return Err(StoreError::NotFound(path));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Serialize `config` as YAML and overwrite the config file.
    pub fn write(&self, config: &Value) -> Result<(), StoreError> {
        let yaml = serde_yaml::to_string(config)?;
        fs::write(self.config_path(), yaml)?;
        Ok(())
    }

    /// Copy the current config file to a timestamped backup beside it.
    ///
    /// The backup is named `dendron.<stamp>[.<infix>].yml`; an empty infix
    /// is omitted entirely, separator included. Fails with
    /// [`StoreError::NotFound`] when no config file exists — a backup of
    /// nothing is an error, not a no-op.
    pub fn create_backup(&self, infix: &str) -> Result<PathBuf, StoreError> {
        let source = self.config_path();
        if !source.exists() {
            return Err(StoreError::NotFound(source));
        }
        let backup = self.ws_root.join(backup_file_name(Local::now(), infix));
        fs::copy(&source, &backup)?;
        tracing::debug!(path = %backup.display(), "wrote config backup");
        Ok(backup)
    }
}

/// Backup file name for a given instant and infix.
///
/// Pure so the naming contract is testable at a fixed timestamp.
pub fn backup_file_name(stamp: DateTime<Local>, infix: &str) -> String {
    let stamp = stamp.format(BACKUP_STAMP_FORMAT);
    if infix.is_empty() {
        format!("dendron.{stamp}.yml")
    } else {
        format!("dendron.{stamp}.{infix}.yml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_stamp() -> DateTime<Local> {
        // 2024-01-02T03:04:05.006 local time
        Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::milliseconds(6)
    }

    #[test]
    fn test_backup_name_with_infix() {
        assert_eq!(
            backup_file_name(fixed_stamp(), "foo"),
            "dendron.2024.01.02.030405006.foo.yml"
        );
    }

    #[test]
    fn test_backup_name_without_infix() {
        assert_eq!(
            backup_file_name(fixed_stamp(), ""),
            "dendron.2024.01.02.030405006.yml"
        );
    }

    #[test]
    fn test_config_path_layout() {
        let store = ConfigStore::new("/tmp/ws");
        assert_eq!(store.config_path(), PathBuf::from("/tmp/ws/dendron.yml"));
    }
}
