use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to start audit tool '{bin}': {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to prepare audit output directory: {0}")]
    Workdir(#[source] std::io::Error),

    #[error("cannot read audit output '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("audit of {url} wrote no result to '{}'", path.display())]
    MissingOutput { url: String, path: PathBuf },

    #[error("audit of {url} failed ({status}): {stderr}")]
    Failed {
        url: String,
        status: String,
        stderr: String,
    },

    /// The tool ran but could not audit the page (unreachable, bad status, ...).
    #[error("audit of {url} could not load the page: {code}: {message}")]
    Runtime {
        url: String,
        code: String,
        message: String,
    },

    #[error("could not parse audit output for {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("audit of {url} timed out after {}s", after.as_secs())]
    Timeout { url: String, after: Duration },
}

impl AuditError {
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
