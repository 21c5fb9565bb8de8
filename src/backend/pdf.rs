//! PDF backend initialization.
//!
//! The rendering engine proper lives behind the init contract; this module
//! only verifies the file header and derives the instance data the engine
//! is seeded with.

use crate::error::BackendInitError;
use crate::io::MappedFile;

use super::BackendInstance;

/// `%PDF-1.` plus one version digit.
const SIG_LEN: usize = 8;

/// The signature may appear anywhere in the first kilobyte.
const SCAN_WINDOW: usize = 1024;

/// Instance data for the PDF backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfInstance {
    /// Minor version digit of the `%PDF-1.n` signature (0..=7).
    pub version: u8,
    /// Offset of the signature within the file. Nonzero for files with
    /// junk prepended before the header.
    pub header_offset: usize,
}

/// Init capability for the "pdf" backend.
pub(crate) fn init(file: &MappedFile) -> Result<BackendInstance, BackendInitError> {
    let bytes = file.bytes();
    if bytes.len() < SIG_LEN {
        return Err(BackendInitError::new("pdf", "file too small for a PDF header"));
    }

    let scan_end = bytes.len().min(SCAN_WINDOW);
    let hit = bytes[..scan_end]
        .windows(SIG_LEN)
        .position(|w| w[..7] == *b"%PDF-1." && (b'0'..=b'7').contains(&w[7]));

    match hit {
        Some(offset) => Ok(BackendInstance::Pdf(PdfInstance {
            version: bytes[offset + 7] - b'0',
            header_offset: offset,
        })),
        None => Err(BackendInitError::new(
            "pdf",
            "no PDF signature in the first kilobyte",
        )),
    }
}
