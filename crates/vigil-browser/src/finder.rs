//! Locating a Chrome/Chromium executable.
//!
//! Resolution order:
//! 1. The configured `browser.chrome_path`
//! 2. The `CHROME_PATH` environment variable
//! 3. Well-known install locations for the current OS
//! 4. Executable names on `PATH`

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::BrowserError;

/// Executable names searched on `PATH`, most specific first.
const PATH_NAMES: [&str; 5] = [
    "google-chrome-stable",
    "google-chrome",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Inputs for binary resolution, captured once so lookups are deterministic.
#[derive(Debug, Clone, Default)]
pub struct ChromeFinder {
    chrome_path_env: Option<String>,
    path_var: Option<OsString>,
    candidates: Vec<PathBuf>,
}

impl ChromeFinder {
    /// Capture `CHROME_PATH`, `PATH`, and the platform's install locations.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            chrome_path_env: std::env::var("CHROME_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            path_var: std::env::var_os("PATH"),
            candidates: platform_candidates(),
        }
    }

    #[must_use]
    pub fn with_chrome_path_env(mut self, value: Option<String>) -> Self {
        self.chrome_path_env = value;
        self
    }

    #[must_use]
    pub fn with_path_var(mut self, value: Option<OsString>) -> Self {
        self.path_var = value;
        self
    }

    #[must_use]
    pub fn with_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Resolve the browser executable.
    ///
    /// An `explicit` path that cannot be used is an error rather than a reason
    /// to fall through to auto-detection.
    ///
    /// # Errors
    ///
    /// [`BrowserError::InvalidBinary`] for an unusable explicit or `CHROME_PATH`
    /// value, [`BrowserError::NotFound`] when auto-detection finds nothing.
    pub fn find(&self, explicit: Option<&str>) -> Result<PathBuf, BrowserError> {
        if let Some(explicit) = explicit {
            return self
                .resolve_named(explicit)
                .ok_or_else(|| BrowserError::InvalidBinary(PathBuf::from(explicit)));
        }

        if let Some(env_path) = &self.chrome_path_env {
            return self
                .resolve_named(env_path)
                .ok_or_else(|| BrowserError::InvalidBinary(PathBuf::from(env_path)));
        }

        if let Some(found) = self.candidates.iter().find(|c| is_executable(c)) {
            return Ok(found.clone());
        }

        PATH_NAMES
            .iter()
            .find_map(|name| self.search_path(name))
            .ok_or(BrowserError::NotFound)
    }

    /// A value with a path separator is taken as a path; a bare name is looked
    /// up on `PATH`.
    fn resolve_named(&self, value: &str) -> Option<PathBuf> {
        let path = Path::new(value);
        if path.components().count() > 1 || path.is_absolute() {
            return is_executable(path).then(|| path.to_path_buf());
        }
        self.search_path(value)
    }

    fn search_path(&self, name: &str) -> Option<PathBuf> {
        let path_var = self.path_var.as_ref()?;
        std::env::split_paths(path_var)
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(target_os = "linux")]
fn platform_candidates() -> Vec<PathBuf> {
    [
        "/usr/bin/google-chrome-stable",
        "/usr/bin/google-chrome",
        "/opt/google/chrome/chrome",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

#[cfg(target_os = "macos")]
fn platform_candidates() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = [
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    if let Some(home) = std::env::var_os("HOME") {
        candidates.push(
            PathBuf::from(home)
                .join("Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
        );
    }
    candidates
}

#[cfg(target_os = "windows")]
fn platform_candidates() -> Vec<PathBuf> {
    ["LOCALAPPDATA", "PROGRAMFILES", "PROGRAMFILES(X86)"]
        .iter()
        .filter_map(std::env::var_os)
        .map(|base| PathBuf::from(base).join("Google\\Chrome\\Application\\chrome.exe"))
        .collect()
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_candidates() -> Vec<PathBuf> {
    Vec::new()
}
