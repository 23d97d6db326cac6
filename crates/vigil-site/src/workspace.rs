//! Report workspace reset.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::SiteError;

/// Delete whatever is at `path`, then create it as an empty directory.
///
/// A missing path is not an error. Anything that cannot be removed or
/// recreated is fatal to the run.
///
/// # Errors
///
/// Returns [`SiteError::Filesystem`] when removal or creation fails.
pub fn reset(path: &Path) -> Result<(), SiteError> {
    let fs_error = |source| SiteError::Filesystem {
        path: path.to_path_buf(),
        source,
    };

    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path).map_err(fs_error)?,
        Ok(_) => fs::remove_file(path).map_err(fs_error)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(fs_error(e)),
    }

    fs::create_dir_all(path).map_err(fs_error)?;
    tracing::debug!(path = %path.display(), "report workspace reset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_empty_dir(path: &Path) -> bool {
        path.is_dir() && fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_none())
    }

    #[test]
    fn creates_missing_workspace() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let reports = temp.path().join("reports");

        reset(&reports).expect("reset should succeed");
        assert!(is_empty_dir(&reports));
    }

    #[test]
    fn empties_populated_workspace() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let reports = temp.path().join("reports");
        fs::create_dir_all(reports.join("nested/deeper")).unwrap();
        fs::write(reports.join("index.html"), "old report").unwrap();
        fs::write(reports.join("nested/deeper/x.json"), "{}").unwrap();

        reset(&reports).expect("reset should succeed");
        assert!(is_empty_dir(&reports));
    }

    #[test]
    fn keeps_empty_workspace_empty() {
        let temp = tempfile::tempdir().expect("tempdir should create");

        reset(temp.path()).expect("reset should succeed");
        assert!(is_empty_dir(temp.path()));
    }

    #[test]
    fn replaces_plain_file_with_directory() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let reports = temp.path().join("reports");
        fs::write(&reports, "not a directory").unwrap();

        reset(&reports).expect("reset should succeed");
        assert!(is_empty_dir(&reports));
    }

    #[test]
    fn uncreatable_workspace_is_filesystem_error() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "file in the way").unwrap();

        let err = reset(&blocker.join("reports")).unwrap_err();
        assert!(matches!(err, SiteError::Filesystem { .. }));
    }
}
