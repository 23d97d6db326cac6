//! Build directory and static server configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

fn default_build_path() -> PathBuf {
    PathBuf::from("dist")
}

fn default_host() -> String {
    String::from("127.0.0.1")
}

const fn default_port() -> u16 {
    3000
}

const fn default_stop_timeout_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Directory holding the built pages.
    #[serde(default = "default_build_path")]
    pub build_path: PathBuf,

    /// Interface the static server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the static server listens on. `0` picks a free port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// How long to wait for the static server to shut down before forcing exit.
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            build_path: default_build_path(),
            host: default_host(),
            port: default_port(),
            stop_timeout_ms: default_stop_timeout_ms(),
        }
    }
}

impl SiteConfig {
    #[must_use]
    pub const fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}
