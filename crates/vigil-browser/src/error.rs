use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("no Chrome or Chromium binary found; set browser.chrome_path or CHROME_PATH")]
    NotFound,

    #[error("configured browser '{0}' does not exist or is not executable")]
    InvalidBinary(PathBuf),

    #[error("failed to launch browser '{}': {source}", binary.display())]
    Launch {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("browser exited before its debugging port opened ({status})")]
    ExitedEarly { status: String },

    #[error("browser debugging port {port} not ready after {waited_ms}ms")]
    NotReady { port: u16, waited_ms: u128 },

    #[error("failed to build readiness check client: {0}")]
    ReadinessClient(#[source] reqwest::Error),

    #[error("failed to prepare browser profile: {0}")]
    Profile(#[source] std::io::Error),

    #[error("failed to terminate browser on port {port}: {source}")]
    Terminate {
        port: u16,
        #[source]
        source: std::io::Error,
    },
}
