//! PostScript backend initialization.

use crate::error::BackendInitError;
use crate::io::MappedFile;

use super::BackendInstance;

/// `%!PS-Adobe-M.m`
const HEADER_LEN: usize = 14;

/// Instance data for the PostScript backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsInstance {
    /// DSC major version (1..=3).
    pub major: u8,
    /// DSC minor version (0..=2).
    pub minor: u8,
}

/// Init capability for the "ps" backend. Requires a DSC-conforming header
/// at the start of the file.
pub(crate) fn init(file: &MappedFile) -> Result<BackendInstance, BackendInitError> {
    let bytes = file.bytes();
    if bytes.len() < HEADER_LEN {
        return Err(BackendInitError::new("ps", "file too small for a DSC header"));
    }

    if !bytes.starts_with(b"%!PS-Adobe-") || bytes[12] != b'.' {
        return Err(BackendInitError::new("ps", "no %!PS-Adobe- header"));
    }

    let (major, minor) = (bytes[11], bytes[13]);
    if !(b'1'..=b'3').contains(&major) || !(b'0'..=b'2').contains(&minor) {
        return Err(BackendInitError::new(
            "ps",
            format!("unsupported DSC version {}.{}", major as char, minor as char),
        ));
    }

    Ok(BackendInstance::Ps(PsInstance {
        major: major - b'0',
        minor: minor - b'0',
    }))
}
