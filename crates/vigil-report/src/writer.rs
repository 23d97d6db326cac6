use std::borrow::Cow;
use std::path::Path;

use vigil_core::{AuditOutput, ReportFormat};

use crate::error::ReportError;
use crate::html::HtmlReport;

/// Render `audit` in `format`.
///
/// [`ReportFormat::Html`] is the audit tool's own report, passed through
/// unchanged.
///
/// # Errors
///
/// Returns [`ReportError::MissingNativeHtml`] when `format` is
/// [`ReportFormat::Html`] and the tool produced no HTML, or
/// [`ReportError::Render`] if JSON serialization fails.
pub fn render(audit: &AuditOutput, format: ReportFormat) -> Result<Cow<'_, str>, ReportError> {
    match format {
        ReportFormat::Html => audit
            .native_html
            .as_deref()
            .map(Cow::Borrowed)
            .ok_or_else(|| ReportError::MissingNativeHtml {
                url: audit.result.requested_url.clone(),
            }),
        ReportFormat::Summary => Ok(Cow::Owned(HtmlReport::new(&audit.result).to_string())),
        ReportFormat::Json => Ok(Cow::Owned(serde_json::to_string_pretty(&audit.result)?)),
    }
}

/// Render `audit` and persist it at `dest`, replacing any existing file.
///
/// The parent directory must already exist; the workspace is prepared
/// before any report is written.
///
/// # Errors
///
/// Returns [`ReportError::Write`] on filesystem failure, or any error from
/// [`render`].
pub fn write(audit: &AuditOutput, dest: &Path, format: ReportFormat) -> Result<(), ReportError> {
    let body = render(audit, format)?;
    std::fs::write(dest, body.as_bytes()).map_err(|source| ReportError::Write {
        path: dest.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %dest.display(), %format, "report written");
    Ok(())
}
