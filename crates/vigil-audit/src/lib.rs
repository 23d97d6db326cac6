//! # vigil-audit
//!
//! Runs a performance/quality audit of one URL through a live browser session.
//!
//! [`LighthouseAuditor`] shells out to the Lighthouse CLI, pointing it at the
//! session's remote-debugging port. The JSON result is parsed into a
//! [`vigil_core::AuditResult`] and the tool's own HTML report is kept
//! alongside it in a [`vigil_core::AuditOutput`]. [`run_with_deadline`] bounds a single audit.
//! The caller owns the session and tears it down whatever the outcome.

pub mod error;
pub mod flags;
pub mod lhr;
pub mod runner;

pub use error::AuditError;
pub use runner::{Auditor, LighthouseAuditor, run_with_deadline};
