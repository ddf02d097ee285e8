//! Versioned configuration model
//!
//! The on-disk schema has changed three times; every installed workspace
//! keeps working without forced migration. This module carries:
//! 1. The schema model (version discriminant, required-field tables)
//! 2. Default generation per version
//! 3. Shallow merge and dotted-path lookup primitives
//! 4. The version-aware resolver that absorbs all legacy fallback rules

pub mod defaults;
pub mod resolver;
pub mod schema;
pub mod value;

pub use defaults::gen_default_config;
pub use resolver::{get_config, get_prop, is_required_path, legacy_key};
pub use schema::{validate_shape, ConfigVersion, SchemaError, CURRENT_VERSION};
pub use value::{get_path, shallow_merge};
