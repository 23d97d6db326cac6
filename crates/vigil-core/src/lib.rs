//! # vigil-core
//!
//! Core types shared across all Vigil crates:
//! - [`BuildArtifact`]: an audit-eligible page discovered in the build directory
//! - [`AuditResult`]: the structured outcome of one page audit
//! - [`AuditOutput`]: that result plus the audit tool's own HTML report
//! - Enums for form factor, throttling, report format, and pipeline state
//! - CLI response types

pub mod artifact;
pub mod audit;
pub mod enums;
pub mod responses;

pub use artifact::BuildArtifact;
pub use audit::{AuditOutput, AuditResult, CategoryScore, Diagnostic, Metric, ScoreBand};
pub use enums::{FormFactor, PipelineState, ReportFormat, ThrottlingMethod};
pub use responses::{PageListResponse, RunSummary};
