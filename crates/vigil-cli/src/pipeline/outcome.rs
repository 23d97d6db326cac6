use std::path::PathBuf;

use vigil_core::{BuildArtifact, PipelineState, RunSummary};
use vigil_site::StopOutcome;

use super::error::PipelineError;

/// Everything a finished run produced. Reports written before a failure are
/// kept on disk and listed here.
#[derive(Debug)]
pub struct RunOutcome {
    pub state: PipelineState,
    pub failed_at: Option<PipelineState>,
    pub pages: Vec<BuildArtifact>,
    pub reports: Vec<PathBuf>,
    pub opened: usize,
    pub error: Option<PipelineError>,
    /// `None` when the run failed before the server started.
    pub server_stop: Option<StopOutcome>,
}

impl RunOutcome {
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self.state {
            PipelineState::Done => 0,
            _ => 1,
        }
    }

    /// Whether the server outlived its stop timeout, leaving only a process
    /// exit to release the port.
    #[must_use]
    pub fn needs_forced_exit(&self) -> bool {
        self.server_stop == Some(StopOutcome::TimedOut)
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            state: self.state,
            failed_at: self.failed_at,
            pages: self.pages.iter().map(ToString::to_string).collect(),
            reports: self
                .reports
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
            opened: self.opened,
            error: self.error.as_ref().map(ToString::to_string),
            exit_code: self.exit_code(),
        }
    }
}
