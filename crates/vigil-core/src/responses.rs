//! CLI response types printed by `vigil` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PipelineState;

/// Response from `vigil audit`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RunSummary {
    pub state: PipelineState,
    /// State the run was in when it failed.
    pub failed_at: Option<PipelineState>,
    /// Discovered pages, in discovery order.
    pub pages: Vec<String>,
    /// Reports written during this run, including those kept after a failure.
    pub reports: Vec<String>,
    pub opened: usize,
    pub error: Option<String>,
    pub exit_code: i32,
}

/// Response from `vigil pages`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PageListResponse {
    pub build_path: String,
    pub pages: Vec<String>,
}
