//! EPUB backend initialization.
//!
//! An EPUB is a ZIP container whose first entry must be an unencrypted
//! "mimetype" file holding `application/epub+zip`. Init re-reads the local
//! file header and records how the container stores that entry.

use crate::error::BackendInitError;
use crate::io::MappedFile;

use super::BackendInstance;

const MIN_LEN: usize = 48;
const LOCAL_FILE_MAGIC: u32 = 0x0403_4b50;

#[inline]
fn u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Instance data for the EPUB backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpubInstance {
    /// ZIP "version needed to extract" of the mimetype entry.
    pub version_needed: u16,
    /// Whether the mimetype entry is deflated (method 8) or stored.
    pub deflated: bool,
}

/// Init capability for the "epub" backend.
pub(crate) fn init(file: &MappedFile) -> Result<BackendInstance, BackendInitError> {
    let bytes = file.bytes();
    if bytes.len() < MIN_LEN {
        return Err(BackendInitError::new("epub", "file too small for a ZIP header"));
    }

    if u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) != LOCAL_FILE_MAGIC {
        return Err(BackendInitError::new("epub", "not a ZIP container"));
    }

    let version_needed = u16_le(&bytes[4..6]);
    if !matches!(version_needed, 10 | 20 | 45) {
        return Err(BackendInitError::new(
            "epub",
            format!("unsupported version needed to extract: {version_needed}"),
        ));
    }

    if u16_le(&bytes[6..8]) & 1 != 0 {
        return Err(BackendInitError::new("epub", "first entry is encrypted"));
    }

    let method = u16_le(&bytes[8..10]);
    if !matches!(method, 0 | 8) {
        return Err(BackendInitError::new(
            "epub",
            format!("unsupported compression method: {method}"),
        ));
    }

    let name_ok = u16_le(&bytes[26..28]) == 8
        && u16_le(&bytes[28..30]) == 0
        && bytes[30..38] == *b"mimetype"
        && bytes
            .get(38..58)
            .is_some_and(|mime| mime == b"application/epub+zip");
    if !name_ok {
        return Err(BackendInitError::new(
            "epub",
            "first entry is not an epub mimetype declaration",
        ));
    }

    Ok(BackendInstance::Epub(EpubInstance {
        version_needed,
        deflated: method == 8,
    }))
}
