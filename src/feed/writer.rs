//! Output artifact writing.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::Result;

/// Replace the file at `path` with `bytes` as a unit.
///
/// Parent directories are created as needed. The content goes to a temporary
/// file in the same directory which is then renamed over `path`, so readers
/// see either the previous document or the new one. On failure the temporary
/// file is removed and the previous document is left untouched.
///
/// The new file takes the mode of the one it replaces, or `0644` when there
/// is none, so readers running as other users keep access.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    #[cfg(unix)]
    tmp.as_file().set_permissions(artifact_permissions(path))?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Mode for a fresh artifact; temp files start out owner-only.
#[cfg(unix)]
const DEFAULT_MODE: u32 = 0o644;

#[cfg(unix)]
fn artifact_permissions(path: &Path) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    match fs::metadata(path) {
        Ok(meta) => meta.permissions(),
        Err(_) => fs::Permissions::from_mode(DEFAULT_MODE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dist/nested/feed.xml");

        write_atomic(&path, b"<rss/>").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"<rss/>");
    }

    #[test]
    fn test_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.xml");
        fs::write(&path, b"old").unwrap();

        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.xml");

        write_atomic(&path, b"one").unwrap();
        write_atomic(&path, b"two").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let result = write_atomic(&blocker.join("feed.xml"), b"data");
        assert!(matches!(result, Err(crate::FeedError::Io(_))));
        assert_eq!(fs::read(&blocker).unwrap(), b"x");
    }

    #[cfg(unix)]
    #[test]
    fn test_new_artifact_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.xml");

        write_atomic(&path, b"<rss/>").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_replacement_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.xml");
        fs::write(&path, b"old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_atomic(&path, b"new").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(fs::read(&path).unwrap(), b"new");
    }
}
