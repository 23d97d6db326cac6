//! Path resolution for comparing configured directories.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Absolute form of `path` without `.` or `..` components, with its deepest
/// existing ancestor canonicalized so symlinked spellings of one directory
/// compare equal. `path` itself need not exist.
pub(crate) fn resolve(path: &Path) -> io::Result<PathBuf> {
    let mut normal = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normal.pop();
            }
            other => normal.push(other),
        }
    }

    for ancestor in normal.ancestors() {
        if let (Ok(resolved), Ok(rest)) = (ancestor.canonicalize(), normal.strip_prefix(ancestor)) {
            if rest.as_os_str().is_empty() {
                return Ok(resolved);
            }
            return Ok(resolved.join(rest));
        }
    }
    Ok(normal)
}
