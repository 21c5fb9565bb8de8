//! Read-only memory mapping of a document file.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tracing::debug;
use url::Url;

use crate::error::OpenError;

/// An opened document file: canonical path plus an immutable view of its
/// bytes, valid for the lifetime of this value.
///
/// The mapping is created read-only and never mutated; the sniffer, the
/// dispatcher and the bound backend all share the same borrowed view.
/// Dropping the `MappedFile` releases the mapping.
pub struct MappedFile {
    path: PathBuf,
    filename: String,
    // A zero-length file cannot be mapped on most platforms; it is
    // represented as no mapping and an empty byte view.
    map: Option<Mmap>,
}

impl MappedFile {
    /// Resolve `input` and map the file it names, read-only.
    ///
    /// `input` is a filesystem path or a `file://` URI. The path is
    /// canonicalized before opening, so [`MappedFile::filename`] always
    /// reports an absolute path without symlinks.
    ///
    /// # Errors
    ///
    /// [`OpenError::PathResolution`] when the input is empty, the URI does
    /// not parse, or the path does not resolve to an existing file;
    /// [`OpenError::Map`] when the file cannot be opened or mapped.
    pub fn open(input: &str) -> Result<MappedFile, OpenError> {
        let path = resolve_path(input)?;

        let file = File::open(&path).map_err(|source| OpenError::Map {
            path: path.clone(),
            source,
        })?;

        let len = file
            .metadata()
            .map_err(|source| OpenError::Map {
                path: path.clone(),
                source,
            })?
            .len();

        let map = if len == 0 {
            None
        } else {
            // SAFETY: the mapping is read-only and this process never
            // writes to the file while the map is alive.
            let map = unsafe { Mmap::map(&file) }.map_err(|source| OpenError::Map {
                path: path.clone(),
                source,
            })?;
            Some(map)
        };

        debug!("mapped '{}' ({} bytes)", path.display(), len);

        let filename = path.to_string_lossy().into_owned();
        Ok(MappedFile {
            path,
            filename,
            map,
        })
    }

    /// Canonical absolute path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Canonical path as a string, for sniffing and diagnostics.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The mapped bytes.
    pub fn bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }

    /// Byte length of the file.
    pub fn len(&self) -> usize {
        self.map.as_ref().map_or(0, |m| m.len())
    }

    /// Whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for MappedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedFile")
            .field("path", &self.path)
            .field("len", &self.len())
            .finish()
    }
}

/// Turn a path or `file://` URI into a canonical filesystem path.
fn resolve_path(input: &str) -> Result<PathBuf, OpenError> {
    if input.is_empty() {
        return Err(OpenError::PathResolution {
            path: input.to_string(),
            reason: "empty path".to_string(),
        });
    }

    let raw = if input.starts_with("file://") {
        let url = Url::parse(input).map_err(|e| OpenError::PathResolution {
            path: input.to_string(),
            reason: format!("invalid file URI: {e}"),
        })?;
        url.to_file_path().map_err(|_| OpenError::PathResolution {
            path: input.to_string(),
            reason: "file URI has no local path".to_string(),
        })?
    } else {
        PathBuf::from(input)
    };

    raw.canonicalize().map_err(|e| OpenError::PathResolution {
        path: input.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
