//! Report output configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vigil_core::ReportFormat;

fn default_report_path() -> PathBuf {
    PathBuf::from("reports")
}

const fn default_open() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Report workspace. Emptied at the start of every run.
    #[serde(default = "default_report_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub format: ReportFormat,

    /// Open every report in the default viewer after a successful run.
    #[serde(default = "default_open")]
    pub open: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
            format: ReportFormat::default(),
            open: default_open(),
        }
    }
}
