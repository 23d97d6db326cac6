//! # vigil-site
//!
//! Everything that touches the built site and the report directory on disk:
//! - [`workspace`]: resets the report workspace before a run
//! - [`discovery`]: lists the audit-eligible pages in the build directory
//! - [`server`]: serves the build directory over a local port during the run

pub mod discovery;
pub mod error;
pub mod server;
pub mod workspace;

pub use error::SiteError;
pub use server::{StaticServer, StopOutcome};
