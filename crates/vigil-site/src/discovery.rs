//! Audit-eligible page discovery.

use std::fs;
use std::path::Path;

use vigil_core::BuildArtifact;

use crate::error::SiteError;

/// List the pages directly under `build_dir`.
///
/// Only regular files with the `.html` suffix qualify; subdirectories are not
/// descended into. Order follows filesystem enumeration. No matches yields an
/// empty list.
///
/// # Errors
///
/// Returns [`SiteError::Discovery`] when `build_dir` cannot be read.
pub fn list(build_dir: &Path) -> Result<Vec<BuildArtifact>, SiteError> {
    let discovery_error = |source| SiteError::Discovery {
        path: build_dir.to_path_buf(),
        source,
    };

    let mut artifacts = Vec::new();
    for entry in fs::read_dir(build_dir).map_err(discovery_error)? {
        let entry = entry.map_err(discovery_error)?;

        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::warn!(name = ?entry.file_name(), "skipping non UTF-8 file name");
            continue;
        };

        if BuildArtifact::is_page(&name) && entry.path().is_file() {
            artifacts.push(BuildArtifact::new(name));
        }
    }

    tracing::debug!(
        build_dir = %build_dir.display(),
        count = artifacts.len(),
        "discovered pages"
    );
    Ok(artifacts)
}
