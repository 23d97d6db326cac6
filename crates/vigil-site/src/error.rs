use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    /// The report workspace could not be removed or recreated.
    #[error("filesystem error at '{}': {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build directory could not be enumerated.
    #[error("cannot read build directory '{}': {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The static server could not start.
    #[error("static server failed on {addr}: {reason}")]
    Server { addr: String, reason: String },
}
