//! # vigil-report
//!
//! Persists an [`AuditOutput`](vigil_core::AuditOutput) as a report.
//!
//! The default HTML report is the audit tool's own page, written as-is.
//! Summary reports are a single self-contained document rendered here
//! (inline styles, no external assets) so they open correctly from the
//! filesystem. JSON reports are the pretty-printed result.

pub mod error;
pub mod html;
pub mod writer;

pub use error::ReportError;
pub use html::HtmlReport;
pub use writer::{render, write};
