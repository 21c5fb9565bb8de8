//! DjVu backend initialization.
//!
//! DjVu files are IFF85 containers: the "AT&T" magic, a FORM chunk with a
//! 32-bit big-endian length, then the form type that distinguishes
//! single-page from bundled multi-page documents.

use crate::error::BackendInitError;
use crate::io::MappedFile;

use super::BackendInstance;

/// Magic + FORM + length + form type.
const HEADER_LEN: usize = 16;

const MAGIC: [u8; 4] = [0x41, 0x54, 0x26, 0x54];

/// Document shape, from the top-level form type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DjvuKind {
    /// `DJVU` form: a single page.
    SinglePage,
    /// `DJVM` form: a bundled multi-page document.
    Bundled,
}

/// Instance data for the DjVu backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DjvuInstance {
    pub kind: DjvuKind,
}

/// Init capability for the "djvu" backend.
pub(crate) fn init(file: &MappedFile) -> Result<BackendInstance, BackendInitError> {
    let bytes = file.bytes();
    if bytes.len() < HEADER_LEN {
        return Err(BackendInitError::new("djvu", "file too small for a DjVu header"));
    }

    if bytes[..4] != MAGIC {
        return Err(BackendInitError::new("djvu", "no AT&T magic number"));
    }

    if &bytes[4..8] != b"FORM" {
        return Err(BackendInitError::new("djvu", "no IFF85 FORM chunk"));
    }

    let kind = match &bytes[12..16] {
        b"DJVU" => DjvuKind::SinglePage,
        b"DJVM" => DjvuKind::Bundled,
        other => {
            return Err(BackendInitError::new(
                "djvu",
                format!("unrecognized form type {:?}", String::from_utf8_lossy(other)),
            ))
        }
    };

    Ok(BackendInstance::Djvu(DjvuInstance { kind }))
}
