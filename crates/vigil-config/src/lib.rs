//! # vigil-config
//!
//! Layered configuration loading for Vigil using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VIGIL_*` prefix, `__` as separator)
//! 2. Project-level `.vigil/config.toml`
//! 3. User-level `~/.config/vigil/config.toml`
//! 4. Built-in defaults
//!
//! The loaded [`VigilConfig`] is constructed once per process and passed by
//! reference into each pipeline component. Nothing reads configuration from
//! ambient state after loading.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VIGIL_SITE__PORT` -> `site.port`, `VIGIL_REPORT__PATH` -> `report.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use vigil_config::VigilConfig;
//!
//! let config = VigilConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//! println!("serving {} on port {}", config.site.build_path.display(), config.site.port);
//! ```

mod audit;
mod browser;
mod error;
mod paths;
mod report;
mod site;

pub use audit::{AuditConfig, KNOWN_CATEGORIES};
pub use browser::BrowserConfig;
pub use error::ConfigError;
pub use report::ReportConfig;
pub use site::SiteConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".vigil/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VigilConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl VigilConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("VIGIL_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vigil").join("config.toml"))
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.host.trim().is_empty() {
            return Err(ConfigError::invalid("site.host", "must not be empty"));
        }

        if self.audit.categories.is_empty() {
            return Err(ConfigError::invalid(
                "audit.categories",
                "at least one category is required",
            ));
        }

        let unknown = self.audit.unknown_categories();
        if !unknown.is_empty() {
            return Err(ConfigError::invalid(
                "audit.categories",
                format!(
                    "unknown categories [{}]; expected any of [{}]",
                    unknown.join(", "),
                    KNOWN_CATEGORIES.join(", ")
                ),
            ));
        }

        if self.audit.screen_width == 0 || self.audit.screen_height == 0 {
            return Err(ConfigError::invalid(
                "audit.screen_width",
                "screen dimensions must be positive",
            ));
        }

        if !(self.audit.device_scale_factor > 0.0) {
            return Err(ConfigError::invalid(
                "audit.device_scale_factor",
                "must be positive",
            ));
        }

        if self.audit.lighthouse_bin.trim().is_empty() {
            return Err(ConfigError::invalid("audit.lighthouse_bin", "must not be empty"));
        }

        self.check_report_workspace()
    }

    /// Reject a report workspace whose reset would delete the build directory
    /// or the working directory.
    ///
    /// Both paths are resolved first (made absolute, `.`/`..` removed,
    /// symlinks followed where they exist), so `.`, `./dist`, and any
    /// ancestor of either directory are refused.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for `report.path` when it equals
    /// or contains the build or working directory, or when a path cannot be
    /// resolved.
    pub fn check_report_workspace(&self) -> Result<(), ConfigError> {
        let report = resolve_field("report.path", &self.report.path)?;

        let cwd = std::env::current_dir().map_err(|error| {
            ConfigError::invalid("report.path", format!("no working directory: {error}"))
        })?;
        let cwd = resolve_field("report.path", &cwd)?;
        if cwd.starts_with(&report) {
            return Err(ConfigError::invalid(
                "report.path",
                format!(
                    "'{}' contains the working directory '{}'; it is emptied on every run",
                    report.display(),
                    cwd.display()
                ),
            ));
        }

        let build = resolve_field("site.build_path", &self.site.build_path)?;
        if build.starts_with(&report) {
            return Err(ConfigError::invalid(
                "report.path",
                format!(
                    "'{}' contains the build directory '{}'; it is emptied on every run",
                    report.display(),
                    build.display()
                ),
            ));
        }

        Ok(())
    }
}

fn resolve_field(field: &str, path: &Path) -> Result<PathBuf, ConfigError> {
    paths::resolve(path).map_err(|error| {
        ConfigError::invalid(field, format!("cannot resolve '{}': {error}", path.display()))
    })
}
