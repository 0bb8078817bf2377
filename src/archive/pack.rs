//! Directory tree serialization.

use crate::archive::{Entry, EntryKind};
use crate::config::COMPRESSION_LEVEL;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;
use zeroize::Zeroizing;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[cfg(unix)]
fn mode_of(metadata: &fs::Metadata) -> u32 {
    // st_mode carries file-type bits; only the permission bits are portable.
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_of(metadata: &fs::Metadata) -> u32 {
    if metadata.is_dir() {
        0o755
    } else {
        0o644
    }
}

/// Archive the tree rooted at `root` into a compressed blob.
///
/// Walks depth-first without following symlinks. Paths are recorded
/// relative to the parent of `root`, so the root directory name is the
/// top-level prefix inside the archive.
pub fn archive_directory(root: &Path) -> Result<Vec<u8>> {
    let base = root.parent().unwrap_or_else(|| Path::new(""));
    let mut entries = Vec::new();

    for item in WalkDir::new(root).follow_links(false) {
        let item = item?;
        let path = item.path();

        let rel = path
            .strip_prefix(base)
            .map_err(|_| Error::Serialization(format!("path outside root: {}", path.display())))?;
        let rel = rel
            .to_str()
            .ok_or_else(|| {
                Error::Serialization(format!("non-UTF-8 path: {}", path.display()))
            })?
            .replace(std::path::MAIN_SEPARATOR, "/");

        let metadata = item.metadata()?;
        let file_type = item.file_type();

        let kind = if file_type.is_symlink() {
            let target = fs::read_link(path)?;
            let target = target
                .to_str()
                .ok_or_else(|| {
                    Error::Serialization(format!("non-UTF-8 symlink target: {}", path.display()))
                })?
                .to_string();
            EntryKind::Symlink { target }
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File {
                contents: fs::read(path)?,
            }
        };

        entries.push(Entry {
            path: rel,
            mode: mode_of(&metadata),
            kind,
        });
    }

    // The entries hold every file's plaintext; wipe them whether or not
    // encoding succeeded.
    let blob = encode_entries(&entries);
    for entry in &mut entries {
        entry.wipe();
    }
    blob
}

/// Serialize and compress a list of entries into an archive blob.
pub fn encode_entries(entries: &[Entry]) -> Result<Vec<u8>> {
    let raw = Zeroizing::new(bincode::serialize(entries)?);
    zstd::encode_all(raw.as_slice(), COMPRESSION_LEVEL)
        .map_err(|e| Error::Serialization(format!("compression failed: {}", e)))
}
