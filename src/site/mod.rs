//! Site-publishing config normalization
//!
//! A narrower defaulting-then-validation pass over the `site` sub-config,
//! independent of the version engine. Validation failures carry a
//! machine-checkable status code and are always surfaced, never silently
//! defaulted away.

use serde::{Deserialize, Serialize};

/// Environment variable that overrides any configured site URL.
pub const SITE_URL_ENV: &str = "SITE_URL";

/// Environment variable naming the execution stage.
pub const STAGE_ENV: &str = "STAGE";

/// Placeholder site URL substituted in the dev stage.
const DEV_SITE_URL: &str = "http://localhost:8080";

/// Execution stage of the surrounding process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStage {
    /// Local development: the siteUrl-required check is relaxed.
    Dev,
    /// Everything else.
    Prod,
}

impl ExecutionStage {
    /// Read the stage from the `STAGE` env var; anything but `dev` is prod.
    pub fn current() -> Self {
        match std::env::var(STAGE_ENV) {
            Ok(stage) if stage.eq_ignore_ascii_case("dev") => ExecutionStage::Dev,
            _ => ExecutionStage::Prod,
        }
    }
}

/// Raw site config as read from the config file. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Directory (relative to the workspace) the site is generated into.
    pub site_root_dir: Option<String>,

    /// Hierarchies published to the site.
    #[serde(default)]
    pub site_hierarchies: Vec<String>,

    /// Public URL of the published site.
    pub site_url: Option<String>,

    /// Note used as the site index. Defaults to the first hierarchy.
    pub site_index: Option<String>,

    pub site_notes_dir: Option<String>,
    pub site_favicon_path: Option<String>,
    pub copy_assets: Option<bool>,
    pub use_pretty_refs: Option<bool>,
    pub write_stubs: Option<bool>,
    pub description: Option<String>,

    // The GitHub-edit fields predate the camelCase convention and kept
    // their snake_case wire names.
    #[serde(rename = "gh_edit_link_text")]
    pub gh_edit_link_text: Option<String>,
    #[serde(rename = "gh_edit_branch")]
    pub gh_edit_branch: Option<String>,
    #[serde(rename = "gh_edit_view_mode")]
    pub gh_edit_view_mode: Option<String>,
}

/// Fully defaulted and validated site config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanSiteConfig {
    pub site_root_dir: String,
    pub site_hierarchies: Vec<String>,
    pub site_url: String,
    pub site_index: String,
    pub site_notes_dir: String,
    pub site_favicon_path: String,
    pub copy_assets: bool,
    pub use_pretty_refs: bool,
    pub write_stubs: bool,
    pub description: String,
    #[serde(rename = "gh_edit_link_text")]
    pub gh_edit_link_text: String,
    #[serde(rename = "gh_edit_branch")]
    pub gh_edit_branch: String,
    #[serde(rename = "gh_edit_view_mode")]
    pub gh_edit_view_mode: String,
}

/// Structured site-config validation errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SiteConfigError {
    #[error("siteRootDir is required")]
    MissingSiteRootDir,

    #[error("siteUrl is required outside the dev stage; set it in the config or via {SITE_URL_ENV}")]
    MissingSiteUrl,

    #[error("siteHierarchies must have at least one hierarchy")]
    EmptySiteHierarchies,
}

impl SiteConfigError {
    /// Machine-checkable status code for this failure.
    pub fn status_code(&self) -> &'static str {
        match self {
            SiteConfigError::MissingSiteRootDir => "INVALID_CONFIG.SITE_ROOT_DIR",
            SiteConfigError::MissingSiteUrl => "INVALID_CONFIG.SITE_URL",
            SiteConfigError::EmptySiteHierarchies => "INVALID_CONFIG.SITE_HIERARCHIES",
        }
    }
}

/// Apply defaults to `site`, then validate, returning the normalized config.
///
/// The site URL resolves in precedence order: `SITE_URL` env override, dev
/// stage placeholder, configured value. `siteIndex` falls back to the first
/// hierarchy.
pub fn clean_site_config(site: SiteConfig) -> Result<CleanSiteConfig, SiteConfigError> {
    let site_root_dir = site.site_root_dir.ok_or(SiteConfigError::MissingSiteRootDir)?;

    if site.site_hierarchies.is_empty() {
        return Err(SiteConfigError::EmptySiteHierarchies);
    }

    let site_url = match std::env::var(SITE_URL_ENV) {
        Ok(url) if !url.is_empty() => url,
        _ => match ExecutionStage::current() {
            ExecutionStage::Dev => DEV_SITE_URL.to_string(),
            ExecutionStage::Prod => site.site_url.ok_or(SiteConfigError::MissingSiteUrl)?,
        },
    };

    let site_index = site
        .site_index
        .unwrap_or_else(|| site.site_hierarchies[0].clone());

    Ok(CleanSiteConfig {
        site_root_dir,
        site_hierarchies: site.site_hierarchies,
        site_url,
        site_index,
        site_notes_dir: site.site_notes_dir.unwrap_or_else(|| "notes".to_string()),
        site_favicon_path: site
            .site_favicon_path
            .unwrap_or_else(|| "favicon.ico".to_string()),
        copy_assets: site.copy_assets.unwrap_or(true),
        use_pretty_refs: site.use_pretty_refs.unwrap_or(true),
        write_stubs: site.write_stubs.unwrap_or(true),
        description: site
            .description
            .unwrap_or_else(|| "Personal knowledge space".to_string()),
        gh_edit_link_text: site
            .gh_edit_link_text
            .unwrap_or_else(|| "Edit this page on GitHub".to_string()),
        gh_edit_branch: site.gh_edit_branch.unwrap_or_else(|| "main".to_string()),
        gh_edit_view_mode: site.gh_edit_view_mode.unwrap_or_else(|| "edit".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests mutate process env vars; the serial lock keeps them from
    // observing each other's overrides.
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::remove_var(SITE_URL_ENV);
        std::env::remove_var(STAGE_ENV);
        guard
    }

    fn minimal_site() -> SiteConfig {
        SiteConfig {
            site_root_dir: Some("docs".to_string()),
            site_hierarchies: vec!["root".to_string()],
            site_url: Some("https://notes.example.org".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let _guard = env_guard();
        let clean = clean_site_config(minimal_site()).unwrap();
        assert!(clean.copy_assets);
        assert!(clean.use_pretty_refs);
        assert!(clean.write_stubs);
        assert_eq!(clean.site_notes_dir, "notes");
        assert_eq!(clean.site_favicon_path, "favicon.ico");
        assert_eq!(clean.gh_edit_branch, "main");
        assert_eq!(clean.site_index, "root");
    }

    #[test]
    fn test_explicit_site_index_wins() {
        let _guard = env_guard();
        let site = SiteConfig {
            site_index: Some("home".to_string()),
            site_hierarchies: vec!["root".to_string(), "home".to_string()],
            ..minimal_site()
        };
        let clean = clean_site_config(site).unwrap();
        assert_eq!(clean.site_index, "home");
    }

    #[test]
    fn test_missing_site_root_dir_rejected() {
        let _guard = env_guard();
        let site = SiteConfig {
            site_root_dir: None,
            ..minimal_site()
        };
        let err = clean_site_config(site).unwrap_err();
        assert_eq!(err, SiteConfigError::MissingSiteRootDir);
        assert_eq!(err.status_code(), "INVALID_CONFIG.SITE_ROOT_DIR");
    }

    #[test]
    fn test_empty_hierarchies_rejected_unconditionally() {
        let _guard = env_guard();
        std::env::set_var(STAGE_ENV, "dev");
        let site = SiteConfig {
            site_hierarchies: vec![],
            ..minimal_site()
        };
        let err = clean_site_config(site).unwrap_err();
        assert_eq!(err, SiteConfigError::EmptySiteHierarchies);
        std::env::remove_var(STAGE_ENV);
    }

    #[test]
    fn test_missing_site_url_rejected_in_prod() {
        let _guard = env_guard();
        let site = SiteConfig {
            site_url: None,
            ..minimal_site()
        };
        let err = clean_site_config(site).unwrap_err();
        assert_eq!(err, SiteConfigError::MissingSiteUrl);
        assert_eq!(err.status_code(), "INVALID_CONFIG.SITE_URL");
    }

    #[test]
    fn test_dev_stage_substitutes_placeholder_url() {
        let _guard = env_guard();
        std::env::set_var(STAGE_ENV, "dev");
        let site = SiteConfig {
            site_url: None,
            ..minimal_site()
        };
        let clean = clean_site_config(site).unwrap();
        assert_eq!(clean.site_url, "http://localhost:8080");
        std::env::remove_var(STAGE_ENV);
    }

    #[test]
    fn test_env_override_beats_configured_url() {
        let _guard = env_guard();
        std::env::set_var(SITE_URL_ENV, "https://override.example.org");
        let clean = clean_site_config(minimal_site()).unwrap();
        assert_eq!(clean.site_url, "https://override.example.org");
        std::env::remove_var(SITE_URL_ENV);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let site: SiteConfig = serde_json::from_value(serde_json::json!({
            "siteRootDir": "docs",
            "siteHierarchies": ["root"],
            "siteUrl": "https://x.example.org",
        }))
        .unwrap();
        assert_eq!(site.site_root_dir.as_deref(), Some("docs"));
        assert_eq!(site.site_hierarchies, vec!["root"]);
    }
}
