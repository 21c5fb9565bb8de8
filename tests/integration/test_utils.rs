//! Test utilities for integration tests.
//!
//! Byte-level builders for minimal valid samples of each supported format,
//! helpers for putting them on disk (the open path memory-maps real
//! files), and a tracking backend for asserting probe order.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use pagedock::{BackendDescriptor, BackendInitError, BackendInstance, PdfInstance};

// =============================================================================
// Sample Builders
// =============================================================================

/// Smallest PDF the sniffer and backend both accept.
pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF\n".to_vec()
}

/// A PDF whose signature sits past offset 0, inside the first kilobyte.
pub fn pdf_bytes_with_junk_prefix(prefix_len: usize) -> Vec<u8> {
    let mut data = vec![b'\n'; prefix_len];
    data.extend_from_slice(&pdf_bytes());
    data
}

/// DSC-conforming PostScript header.
pub fn ps_bytes() -> Vec<u8> {
    b"%!PS-Adobe-3.0\n%%Pages: 1\n%%EOF\n".to_vec()
}

/// Single-page DjVu: AT&T magic, FORM chunk, DJVU form type.
pub fn djvu_bytes() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&[0x41, 0x54, 0x26, 0x54]);
    data.extend_from_slice(b"FORM");
    data.extend_from_slice(&32u32.to_be_bytes());
    data.extend_from_slice(b"DJVU");
    data.extend_from_slice(&[0u8; 32]);
    data
}

/// RAR container bytes for a `.cbr` comic book.
pub fn cbr_bytes() -> Vec<u8> {
    let mut data = b"Rar!\x1a\x07\x00".to_vec();
    data.extend_from_slice(&[0u8; 16]);
    data
}

/// ZIP container bytes for a `.cbz` comic book.
pub fn cbz_bytes() -> Vec<u8> {
    let mut data = b"PK\x03\x04".to_vec();
    data.extend_from_slice(&[0u8; 28]);
    data
}

/// EPUB container start: stored, unencrypted "mimetype" entry.
pub fn epub_bytes() -> Vec<u8> {
    let mut buf = vec![0u8; 64];
    buf[0..4].copy_from_slice(&0x0403_4b50u32.to_le_bytes());
    buf[4..6].copy_from_slice(&20u16.to_le_bytes());
    buf[8..10].copy_from_slice(&0u16.to_le_bytes());
    buf[18..22].copy_from_slice(&20u32.to_le_bytes());
    buf[22..26].copy_from_slice(&20u32.to_le_bytes());
    buf[26..28].copy_from_slice(&8u16.to_le_bytes());
    buf[28..30].copy_from_slice(&0u16.to_le_bytes());
    buf[30..38].copy_from_slice(b"mimetype");
    buf[38..58].copy_from_slice(b"application/epub+zip");
    buf
}

/// Little-endian classic TIFF header with an in-bounds IFD offset.
pub fn tiff_bytes() -> Vec<u8> {
    let mut data = vec![0u8; 64];
    data[0..4].copy_from_slice(&[b'I', b'I', 42, 0]);
    data[4..8].copy_from_slice(&8u32.to_le_bytes());
    data
}

/// Big-endian BigTIFF header.
pub fn bigtiff_bytes() -> Vec<u8> {
    let mut data = vec![0u8; 64];
    data[0..2].copy_from_slice(b"MM");
    data[2..4].copy_from_slice(&43u16.to_be_bytes());
    data[4..6].copy_from_slice(&8u16.to_be_bytes());
    data[8..16].copy_from_slice(&16u64.to_be_bytes());
    data
}

// =============================================================================
// Filesystem Helpers
// =============================================================================

/// A temp dir holding documents written for one test.
pub struct DocDir {
    dir: TempDir,
}

impl DocDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Write `bytes` under `name` and return the full path as a string.
    pub fn write(&self, name: &str, bytes: &[u8]) -> String {
        let path: PathBuf = self.dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path.to_string_lossy().into_owned()
    }
}

// =============================================================================
// Tracking Backends
// =============================================================================

/// Shared log of backend init attempts, in order.
pub type ProbeLog = Arc<Mutex<Vec<&'static str>>>;

pub fn probe_log() -> ProbeLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// A backend descriptor that records every init attempt in `log` and
/// always rejects the file.
pub fn rejecting_backend(name: &'static str, log: &ProbeLog) -> BackendDescriptor {
    let log = Arc::clone(log);
    BackendDescriptor::new(name, move |_file| {
        log.lock().unwrap().push(name);
        Err(BackendInitError::new(name, "rejected by test backend"))
    })
}

/// A backend descriptor that records every init attempt in `log` and
/// accepts the file with dummy instance data.
pub fn accepting_backend(name: &'static str, log: &ProbeLog) -> BackendDescriptor {
    let log = Arc::clone(log);
    BackendDescriptor::new(name, move |_file| {
        log.lock().unwrap().push(name);
        Ok(BackendInstance::Pdf(PdfInstance {
            version: 0,
            header_offset: 0,
        }))
    })
}
