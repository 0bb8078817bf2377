//! Archive extraction with path-traversal defense.

use crate::archive::{Entry, EntryKind};
use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use zeroize::Zeroizing;

#[cfg(unix)]
use std::os::unix::fs::{symlink, OpenOptionsExt, PermissionsExt};

/// Lexically clean an entry path and reject anything that would resolve
/// outside the extraction root.
///
/// `.` segments are dropped and `..` segments cancel the preceding
/// component. Absolute paths and paths whose `..` segments climb past
/// the start are rejected. A path that cleans to nothing (`.`, `a/..`)
/// addresses the destination root itself and is returned empty. Purely
/// syntactic, no filesystem access, so the check cannot be raced.
fn sanitize(path: &str) -> Result<PathBuf> {
    let mut clean = PathBuf::new();
    let mut depth: usize = 0;

    for component in Path::new(path).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(Error::PathTraversal(path.to_string()));
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(Error::PathTraversal(path.to_string()));
                }
                depth -= 1;
                clean.pop();
            }
            Component::Normal(part) => {
                depth += 1;
                clean.push(part);
            }
        }
    }

    Ok(clean)
}

fn write_file(target: &Path, contents: &[u8], mode: u32) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(target)?;
    file.write_all(contents)?;
    Ok(())
}

fn create_dir(target: &Path, mode: u32) -> Result<()> {
    fs::create_dir_all(target)?;
    #[cfg(unix)]
    fs::set_permissions(target, fs::Permissions::from_mode(mode))?;
    #[cfg(not(unix))]
    let _ = mode;
    Ok(())
}

#[cfg(unix)]
fn create_symlink(target: &Path, link_target: &str) -> Result<()> {
    // Replace whatever currently sits at the path.
    if fs::symlink_metadata(target).is_ok() {
        fs::remove_file(target)?;
    }
    symlink(link_target, target)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_symlink(_target: &Path, _link_target: &str) -> Result<()> {
    Err(Error::Io(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlink extraction is only supported on unix",
    )))
}

fn extract_entry(entry: &Entry, dest: &Path) -> Result<()> {
    // Must happen before any filesystem write for this entry.
    let clean = sanitize(&entry.path)?;

    // A directory entry addressing the destination root is a no-op; a
    // file or symlink there falls through and fails on the open itself.
    if clean.as_os_str().is_empty() && matches!(entry.kind, EntryKind::Directory) {
        return Ok(());
    }

    let target = dest.join(clean);

    match &entry.kind {
        EntryKind::Directory => create_dir(&target, entry.mode)?,
        EntryKind::File { contents } => {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            write_file(&target, contents, entry.mode)?;
        }
        EntryKind::Symlink { target: link_target } => {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            create_symlink(&target, link_target)?;
        }
    }

    Ok(())
}

/// Extract an archive blob into `dest`.
///
/// Stops at the first unsafe or unwritable entry; entries already
/// extracted remain on disk.
pub fn extract(blob: &[u8], dest: &Path) -> Result<()> {
    let raw = Zeroizing::new(
        zstd::decode_all(blob)
            .map_err(|e| Error::Serialization(format!("decompression failed: {}", e)))?,
    );
    let mut entries: Vec<Entry> = bincode::deserialize(&raw)?;

    // The entries hold the decrypted plaintext; wipe them whether or not
    // every entry made it to disk.
    let result = entries.iter().try_for_each(|entry| extract_entry(entry, dest));
    for entry in &mut entries {
        entry.wipe();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::encode_entries;
    use tempfile::TempDir;

    fn file_entry(path: &str, contents: &[u8]) -> Entry {
        Entry {
            path: path.to_string(),
            mode: 0o644,
            kind: EntryKind::File {
                contents: contents.to_vec(),
            },
        }
    }

    #[test]
    fn test_sanitize_plain_path() {
        assert_eq!(sanitize("dir/file.txt").unwrap(), PathBuf::from("dir/file.txt"));
    }

    #[test]
    fn test_sanitize_resolves_dot_segments() {
        assert_eq!(sanitize("dir/./a/../b.txt").unwrap(), PathBuf::from("dir/b.txt"));
    }

    #[test]
    fn test_sanitize_rejects_escape() {
        assert!(matches!(
            sanitize("../../etc/passwd"),
            Err(Error::PathTraversal(_))
        ));
        assert!(matches!(
            sanitize("dir/../../escape"),
            Err(Error::PathTraversal(_))
        ));
    }

    #[test]
    fn test_sanitize_rejects_absolute() {
        assert!(matches!(
            sanitize("/etc/passwd"),
            Err(Error::PathTraversal(_))
        ));
    }

    #[test]
    fn test_sanitize_empty_clean_is_destination_root() {
        assert!(sanitize(".").unwrap().as_os_str().is_empty());
        assert!(sanitize("a/..").unwrap().as_os_str().is_empty());
        assert!(sanitize("").unwrap().as_os_str().is_empty());
    }

    #[test]
    fn test_root_directory_entry_is_noop() {
        let dest = TempDir::new().unwrap();
        let blob = encode_entries(&[
            Entry {
                path: ".".to_string(),
                mode: 0o755,
                kind: EntryKind::Directory,
            },
            file_entry("ok.txt", b"fine"),
        ])
        .unwrap();

        extract(&blob, dest.path()).unwrap();
        assert!(dest.path().join("ok.txt").exists());
    }

    #[test]
    fn test_root_file_entry_fails_with_io_error() {
        let dest = TempDir::new().unwrap();
        let blob = encode_entries(&[file_entry(".", b"cannot be a file")]).unwrap();

        let result = extract(&blob, dest.path());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_extract_rejects_traversal_before_writing() {
        let dest = TempDir::new().unwrap();
        let blob = encode_entries(&[
            file_entry("ok.txt", b"fine"),
            file_entry("../evil.txt", b"escape"),
        ])
        .unwrap();

        let result = extract(&blob, dest.path());
        assert!(matches!(result, Err(Error::PathTraversal(_))));

        // The safe entry before the bad one was extracted; nothing escaped.
        assert!(dest.path().join("ok.txt").exists());
        assert!(!dest.path().parent().unwrap().join("evil.txt").exists());
    }

    #[test]
    fn test_extract_creates_missing_parents() {
        let dest = TempDir::new().unwrap();
        let blob = encode_entries(&[file_entry("a/b/c.txt", b"deep")]).unwrap();

        extract(&blob, dest.path()).unwrap();
        assert_eq!(fs::read(dest.path().join("a/b/c.txt")).unwrap(), b"deep");
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_applies_modes() {
        let dest = TempDir::new().unwrap();
        let blob = encode_entries(&[Entry {
            path: "script.sh".to_string(),
            mode: 0o755,
            kind: EntryKind::File {
                contents: b"#!/bin/sh\n".to_vec(),
            },
        }])
        .unwrap();

        extract(&blob, dest.path()).unwrap();
        let mode = fs::metadata(dest.path().join("script.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_replaces_existing_symlink() {
        let dest = TempDir::new().unwrap();
        fs::write(dest.path().join("link"), b"stale").unwrap();

        let blob = encode_entries(&[Entry {
            path: "link".to_string(),
            mode: 0o777,
            kind: EntryKind::Symlink {
                target: "ok.txt".to_string(),
            },
        }])
        .unwrap();

        extract(&blob, dest.path()).unwrap();
        assert_eq!(
            fs::read_link(dest.path().join("link")).unwrap(),
            PathBuf::from("ok.txt")
        );
    }

    #[test]
    fn test_garbage_blob_rejected() {
        let dest = TempDir::new().unwrap();
        let result = extract(b"not an archive", dest.path());
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
