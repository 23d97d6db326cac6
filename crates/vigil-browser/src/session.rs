use tempfile::TempDir;
use tokio::process::Child;

use crate::Session;
use crate::error::BrowserError;

/// A running browser process and its throwaway profile directory.
///
/// The child is spawned with `kill_on_drop`, so a session dropped without
/// [`Session::terminate`] still does not outlive its owner.
#[derive(Debug)]
pub struct ChromeSession {
    child: Child,
    port: u16,
    profile: TempDir,
}

impl ChromeSession {
    pub(crate) const fn new(child: Child, port: u16, profile: TempDir) -> Self {
        Self {
            child,
            port,
            profile,
        }
    }

    /// OS process id, while the process is running.
    #[must_use]
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }
}

impl Session for ChromeSession {
    fn port(&self) -> u16 {
        self.port
    }

    async fn terminate(mut self) -> Result<(), BrowserError> {
        let port = self.port;
        let terminate_error = |source| BrowserError::Terminate { port, source };

        // Already exited on its own: only reap it.
        if self.child.try_wait().map_err(terminate_error)?.is_none() {
            self.child.start_kill().map_err(terminate_error)?;
        }
        let status = self.child.wait().await.map_err(terminate_error)?;
        tracing::debug!(port, %status, "browser terminated");

        let profile_path = self.profile.path().to_path_buf();
        if let Err(error) = self.profile.close() {
            tracing::warn!(path = %profile_path.display(), %error, "failed to remove browser profile");
        }
        Ok(())
    }
}
