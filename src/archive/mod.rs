//! In-memory directory archiving.
//!
//! A directory tree is serialized into a flat list of [`Entry`] records
//! (bincode) and zstd-compressed into a single blob. The blob only ever
//! exists in memory, between archiving and encryption or between
//! decryption and extraction.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

mod pack;
mod unpack;

pub use pack::{archive_directory, encode_entries};
pub use unpack::extract;

/// One node of an archived directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Path relative to the parent of the archived root, `/`-separated.
    /// The archived directory's own name is the first component.
    pub path: String,

    /// Permission bits as recorded at archive time.
    pub mode: u32,

    /// Node type and payload.
    pub kind: EntryKind,
}

impl Entry {
    /// Overwrite a file payload with zeros. Entries hold plaintext, so
    /// both archiving and extraction wipe them once the filesystem and
    /// the blob are done with them.
    pub(crate) fn wipe(&mut self) {
        if let EntryKind::File { contents } = &mut self.kind {
            contents.zeroize();
        }
    }
}

/// The type of an archive entry, with its type-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Directory,
    File { contents: Vec<u8> },
    Symlink { target: String },
}
