//! Errors produced while loading mesh assets.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Which attribute table a face index points into.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexKind {
    Position,
    TexCoord,
    Normal,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            IndexKind::Position => "position",
            IndexKind::TexCoord => "texture coordinate",
            IndexKind::Normal => "normal",
        })
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("OBJ file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read OBJ file {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `size` comes from the file metadata, or is `limit + 1` when the
    /// limit was crossed while reading (devices, pipes, growing files).
    #[error("OBJ file {} is at least {size} bytes, above the {limit} byte limit", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Malformed face on line {line}: {reason}")]
    MalformedFace { line: usize, reason: String },

    #[error("Malformed '{tag}' record on line {line}")]
    MalformedAttribute { line: usize, tag: &'static str },

    /// `index` is the raw 1-based value from the file; `len` is how many
    /// entries of that kind had been parsed when the face was read.
    #[error("Face on line {line} references {kind} {index}, but only {len} are defined")]
    DanglingIndex {
        line: usize,
        kind: IndexKind,
        index: i64,
        len: usize,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;
