//! Audit tool configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vigil_core::{FormFactor, ThrottlingMethod};

/// Category ids the audit tool knows how to score.
pub const KNOWN_CATEGORIES: [&str; 5] = [
    "performance",
    "accessibility",
    "best-practices",
    "seo",
    "pwa",
];

fn default_lighthouse_bin() -> String {
    String::from("lighthouse")
}

fn default_categories() -> Vec<String> {
    KNOWN_CATEGORIES[..4].iter().map(|c| (*c).to_string()).collect()
}

const fn default_screen_width() -> u32 {
    412
}

const fn default_screen_height() -> u32 {
    823
}

const fn default_device_scale_factor() -> f64 {
    1.75
}

const fn default_timeout_secs() -> u64 {
    180
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Audit tool executable (name on `PATH` or absolute path).
    #[serde(default = "default_lighthouse_bin")]
    pub lighthouse_bin: String,

    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    #[serde(default)]
    pub form_factor: FormFactor,

    #[serde(default)]
    pub throttling_method: ThrottlingMethod,

    #[serde(default = "default_screen_width")]
    pub screen_width: u32,

    #[serde(default = "default_screen_height")]
    pub screen_height: u32,

    #[serde(default = "default_device_scale_factor")]
    pub device_scale_factor: f64,

    /// Extra flags passed verbatim to the audit tool.
    #[serde(default)]
    pub extra_flags: Vec<String>,

    /// Deadline for a single page audit. `0` disables the deadline.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            lighthouse_bin: default_lighthouse_bin(),
            categories: default_categories(),
            form_factor: FormFactor::default(),
            throttling_method: ThrottlingMethod::default(),
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            device_scale_factor: default_device_scale_factor(),
            extra_flags: Vec::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AuditConfig {
    /// Per-audit deadline, or `None` when disabled.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }

    /// Categories not in [`KNOWN_CATEGORIES`].
    #[must_use]
    pub fn unknown_categories(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(String::as_str)
            .filter(|c| !KNOWN_CATEGORIES.contains(c))
            .collect()
    }
}
