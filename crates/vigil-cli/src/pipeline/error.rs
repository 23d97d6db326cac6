use std::path::PathBuf;

use thiserror::Error;
use vigil_audit::AuditError;
use vigil_browser::BrowserError;
use vigil_config::ConfigError;
use vigil_core::PipelineState;
use vigil_report::ReportError;
use vigil_site::SiteError;

/// The single failure signal of an audit run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Site(#[from] SiteError),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("cannot open report '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pipeline transition {from} -> {to}")]
    Transition {
        from: PipelineState,
        to: PipelineState,
    },
}
