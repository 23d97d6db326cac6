use std::path::Path;

/// Opens a finished report for viewing.
pub trait ReportOpener: Send + Sync {
    /// # Errors
    ///
    /// Returns the I/O error from launching the viewer.
    fn open(&self, path: &Path) -> std::io::Result<()>;
}

/// Opens reports in the host's default application.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl ReportOpener for SystemOpener {
    fn open(&self, path: &Path) -> std::io::Result<()> {
        tracing::debug!(path = %path.display(), "opening report");
        open::that(path)
    }
}
