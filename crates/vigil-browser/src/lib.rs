//! # vigil-browser
//!
//! One isolated browser process per audit.
//!
//! [`ChromeLauncher`] starts Chrome/Chromium with a fresh temporary profile and a
//! remote-debugging port, and waits for the debugging endpoint to answer.
//! The resulting [`ChromeSession`] is owned by exactly one audit and must be
//! [terminated](Session::terminate) afterwards. Sessions are never pooled or
//! reused, so cookies, cache, and memory never leak between pages.
//!
//! The [`SessionLauncher`] and [`Session`] traits are the seam the pipeline is
//! generic over.

pub mod error;
pub mod finder;
pub mod launcher;
pub mod session;

use std::future::Future;

pub use error::BrowserError;
pub use finder::ChromeFinder;
pub use launcher::ChromeLauncher;
pub use session::ChromeSession;

/// A live browser process exposing a remote-debugging port.
pub trait Session: Send {
    /// Remote-debugging port assigned to this session.
    fn port(&self) -> u16;

    /// Stop the process and release its resources.
    fn terminate(self) -> impl Future<Output = Result<(), BrowserError>> + Send;
}

/// Starts fresh [`Session`]s.
pub trait SessionLauncher: Send + Sync {
    type Session: Session;

    /// Start a new isolated browser process.
    fn launch(&self) -> impl Future<Output = Result<Self::Session, BrowserError>> + Send;
}
