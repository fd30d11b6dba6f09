//! # File I/O Module
//!
//! Atomic writes for downloaded reference documents: write to a `.tmp`
//! sibling, sync, then rename over the target so a half-finished download
//! never looks like a valid local copy.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::errors::{GuideError, GuideResult};

/// Temp path used while writing `path`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `bytes` to `path` atomically, creating parent directories.
///
/// # Example
///
/// ```rust,no_run
/// use braze_core::file_io::write_atomic;
/// use std::path::Path;
///
/// write_atomic(Path::new("files/MIL-SD-248D.pdf"), b"%PDF-1.4")?;
/// # Ok::<(), braze_core::errors::GuideError>(())
/// ```
pub fn write_atomic(path: &Path, bytes: &[u8]) -> GuideResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            GuideError::file_error("create directory", parent.display().to_string(), e.to_string())
        })?;
    }

    write_via_tmp(path, |file| file.write_all(bytes))
}

/// Run `write` against a fresh temp file, then rename it over `path`.
/// The temp file is removed on every failure path.
fn write_via_tmp<F>(path: &Path, write: F) -> GuideResult<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let tmp_path = tmp_path_for(path);

    if let Err(e) = write_and_sync(&tmp_path, write) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        GuideError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn write_and_sync<F>(tmp_path: &Path, write: F) -> GuideResult<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        GuideError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    write(&mut tmp_file).map_err(|e| {
        GuideError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        GuideError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("files").join("doc.pdf");

        write_atomic(&path, b"%PDF-1.4 test").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4 test");
        assert!(!tmp_path_for(&path).exists(), "temp file should be renamed away");
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        fs::write(&path, b"old").unwrap();

        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");

        let err = write_via_tmp(&path, |file| {
            file.write_all(b"%PDF-1.4 partial")?;
            Err(io::Error::new(io::ErrorKind::Other, "connection reset"))
        })
        .unwrap_err();

        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(!tmp_path_for(&path).exists(), "temp file should be cleaned up");
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_write_keeps_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        fs::write(&path, b"old").unwrap();

        assert!(write_via_tmp(&path, |_| Err(io::Error::new(io::ErrorKind::Other, "disk full"))).is_err());
        assert_eq!(fs::read(&path).unwrap(), b"old");
        assert!(!tmp_path_for(&path).exists());
    }

    #[test]
    fn test_tmp_path_keeps_extension() {
        let tmp = tmp_path_for(Path::new("files/MIL-SD-248D.pdf"));
        assert_eq!(tmp, PathBuf::from("files/MIL-SD-248D.pdf.tmp"));
    }
}
