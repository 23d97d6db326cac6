use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write report '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("audit of {url} produced no HTML report; choose the summary or json format")]
    MissingNativeHtml { url: String },

    #[error("cannot render report: {0}")]
    Render(#[from] serde_json::Error),
}
