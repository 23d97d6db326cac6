//! Browser launch configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const fn default_headless() -> bool {
    true
}

const fn default_startup_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowserConfig {
    /// Explicit browser binary. Empty means auto-detect.
    #[serde(default)]
    pub chrome_path: String,

    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Extra command-line flags appended after the default isolation flags.
    #[serde(default)]
    pub chrome_flags: Vec<String>,

    /// How long to wait for the debugging endpoint to answer after launch.
    #[serde(default = "default_startup_timeout_secs")]
    pub startup_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: String::new(),
            headless: default_headless(),
            chrome_flags: Vec::new(),
            startup_timeout_secs: default_startup_timeout_secs(),
        }
    }
}

impl BrowserConfig {
    #[must_use]
    pub const fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }

    /// The configured binary, if one was set.
    #[must_use]
    pub fn explicit_path(&self) -> Option<&str> {
        let path = self.chrome_path.trim();
        (!path.is_empty()).then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_auto_detect_headless() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.explicit_path().is_none());
        assert_eq!(config.startup_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn blank_path_is_not_explicit() {
        let config = BrowserConfig {
            chrome_path: "   ".into(),
            ..Default::default()
        };
        assert!(config.explicit_path().is_none());
    }
}
