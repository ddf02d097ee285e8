//! Dendron Config - versioned workspace configuration engine
//!
//! This crate implements the configuration resolution and migration engine
//! for a workspace-based note application whose on-disk schema has evolved
//! three times. Older workspaces keep working without forced migration:
//! defaults are generated per version, canonical paths resolve through
//! version-specific fallback rules, and destructive rewrites can be
//! preceded by timestamped backups.

pub mod config;
pub mod hooks;
pub mod site;
pub mod store;

pub use config::{
    gen_default_config, get_config, get_path, get_prop, is_required_path, shallow_merge,
    validate_shape, ConfigVersion, SchemaError, CURRENT_VERSION,
};
pub use hooks::{
    add_to_config, remove_from_config, validate_hook, HookEntry, HookKind, HookLifecycle,
    HookValidation,
};
pub use site::{clean_site_config, CleanSiteConfig, ExecutionStage, SiteConfig, SiteConfigError};
pub use store::{backup_file_name, ConfigStore, StoreError, CONFIG_FILE};
