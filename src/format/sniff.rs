//! Signature sniffing for document files.
//!
//! Each supported format gets one pure probe: a function of the file name
//! and the mapped bytes that reports whether the format's magic signature
//! is present. Probes never read out of bounds: a buffer shorter than a
//! probe's minimum signature size is a no-match, not an error.
//!
//! [`detect`] runs the probes in fixed priority order and returns the first
//! format that matches. The result is a best guess: the dispatcher still
//! falls back to exhaustive backend probing when the guessed backend
//! rejects the file.

use std::path::Path;

use tracing::info;

use super::{Capabilities, DocumentFormat};

// =============================================================================
// Signature constants
// =============================================================================

/// `%PDF-1.` plus one version digit.
const PDF_SIG_LEN: usize = 8;

/// Acrobat accepts the PDF signature anywhere in the first kilobyte.
const PDF_SCAN_WINDOW: usize = 1024;

/// `%!PS-Adobe-M.m`: 11 signature bytes plus major, dot, minor.
const PS_MIN_LEN: usize = 14;

/// DjVu files start with "AT&T".
const DJVU_MAGIC: [u8; 4] = [0x41, 0x54, 0x26, 0x54];

/// RAR archive magic, required for `.cbr`.
const RAR_MAGIC: [u8; 4] = [b'R', b'a', b'r', b'!'];

/// ZIP local-file-header magic bytes, required for `.cbz`.
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// 7z archive magic, required for `.cb7`.
const SEVENZ_MAGIC: [u8; 6] = [0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C];

/// Minimum size of a ZIP local file header naming "mimetype".
const EPUB_MIN_LEN: usize = 48;

/// ZIP local-file-header magic as a little-endian u32.
const ZIP_LOCAL_FILE_MAGIC: u32 = 0x0403_4b50;

/// TIFF header: 2-byte magic + 2-byte version.
const TIFF_HEADER_LEN: usize = 4;

/// Minimum total size for a classic (version 42) TIFF.
const TIFF_MIN_LEN: usize = 8;

/// Minimum total size for a BigTIFF (version 43).
const BIGTIFF_MIN_LEN: usize = 16;

// =============================================================================
// Field helpers
// =============================================================================

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Case-insensitive extension check, e.g. `has_extension("a.CBZ", "cbz")`.
pub(crate) fn has_extension(filename: &str, ext: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

// =============================================================================
// Probes
// =============================================================================

/// `%PDF-1.n` with n in 0..=7, at the start of `window`.
fn pdf_sig_at(window: &[u8]) -> bool {
    window[..7] == *b"%PDF-1." && (b'0'..=b'7').contains(&window[7])
}

/// PDF: signature at offset 0, or anywhere within the first kilobyte
/// (Acrobat accepts the latter, so plenty of real files rely on it).
pub fn is_pdf(filename: &str, bytes: &[u8]) -> bool {
    if bytes.len() < PDF_SIG_LEN {
        info!("'{}' too small to be a PDF file", filename);
        return false;
    }

    if pdf_sig_at(bytes) {
        info!("'{}' is a PDF file", filename);
        return true;
    }

    let scan_end = bytes.len().min(PDF_SCAN_WINDOW);
    if bytes[..scan_end].windows(PDF_SIG_LEN).any(pdf_sig_at) {
        info!("'{}' is a PDF file (signature within first KB)", filename);
        return true;
    }

    info!("no PDF signature in the first KB of '{}'", filename);
    false
}

/// PostScript: `%!PS-Adobe-M.m` at offset 0 with major 1..=3 and minor 0..=2.
///
/// Published DSC versions are 1.0, 1.1, 1.2, 2.0, 2.1 and 3.0; the check
/// accepts the full {1,2,3} x {0,1,2} grid.
pub fn is_ps(filename: &str, bytes: &[u8]) -> bool {
    let res = bytes.len() >= PS_MIN_LEN
        && bytes.starts_with(b"%!PS-Adobe-")
        && (b'1'..=b'3').contains(&bytes[11])
        && bytes[12] == b'.'
        && (b'0'..=b'2').contains(&bytes[13]);

    info!(
        "'{}' is a PostScript file: {}",
        filename,
        if res { "yes" } else { "no" }
    );

    res
}

/// DjVu: "AT&T" magic at offset 0.
pub fn is_djvu(filename: &str, bytes: &[u8]) -> bool {
    if bytes.len() < DJVU_MAGIC.len() {
        info!("'{}' too small to be a DjVu file", filename);
        return false;
    }

    if bytes[..4] != DJVU_MAGIC {
        info!("'{}' does not carry the DjVu magic number", filename);
        return false;
    }

    info!("'{}' is a DjVu file", filename);
    true
}

/// Comic book archives, gated on the file name extension.
///
/// `.cbr`, `.cbz` and `.cb7` additionally require the archive magic of
/// their container; `.cbt` and `.cba` match on extension alone.
pub fn is_cb(filename: &str, bytes: &[u8]) -> bool {
    if has_extension(filename, "cbr") && bytes.len() >= 4 && bytes[..4] == RAR_MAGIC {
        info!("'{}' is a comic book (RAR archive)", filename);
        return true;
    }

    if has_extension(filename, "cbz") && bytes.len() >= 4 && bytes[..4] == ZIP_MAGIC {
        info!("'{}' is a comic book (ZIP archive)", filename);
        return true;
    }

    if has_extension(filename, "cb7") && bytes.len() >= 6 && bytes[..6] == SEVENZ_MAGIC {
        info!("'{}' is a comic book (7z archive)", filename);
        return true;
    }

    if has_extension(filename, "cbt") {
        info!("'{}' is a comic book (tar archive)", filename);
        return true;
    }

    if has_extension(filename, "cba") {
        info!("'{}' is a comic book (ACE archive)", filename);
        return true;
    }

    info!("'{}' is not a comic book", filename);
    false
}

/// EPUB: a ZIP whose first local file header is an uncompressed-or-deflated,
/// unencrypted entry named "mimetype" whose content starts with
/// "application/epub+zip".
pub fn is_epub(filename: &str, bytes: &[u8]) -> bool {
    // The tail comparison reaches offset 58; checked slicing keeps buffers
    // in the 48..58 range a plain no-match.
    let res = bytes.len() >= EPUB_MIN_LEN
        && read_u32_le(&bytes[0..4]) == ZIP_LOCAL_FILE_MAGIC
        && matches!(read_u16_le(&bytes[4..6]), 10 | 20 | 45) // version needed to extract
        && read_u16_le(&bytes[6..8]) & 1 == 0 // not encrypted
        && matches!(read_u16_le(&bytes[8..10]), 0 | 8) // stored or deflated
        && read_u16_le(&bytes[26..28]) == 8 // file name length
        && read_u16_le(&bytes[28..30]) == 0 // no extra field
        && bytes[30..38] == *b"mimetype"
        && bytes
            .get(38..58)
            .is_some_and(|mime| mime == b"application/epub+zip");

    info!(
        "'{}' is an EPUB file: {}",
        filename,
        if res { "yes" } else { "no" }
    );

    res
}

/// TIFF: `II`, `MM` or the MDI `EP` marker, followed by a version field of
/// 42 (classic, total size >= 8) or 43 (BigTIFF, total size >= 16).
///
/// The version field is read in the byte order the magic declares; MDI is
/// a little-endian format.
pub fn is_tiff(filename: &str, bytes: &[u8]) -> bool {
    if bytes.len() < TIFF_HEADER_LEN {
        info!("'{}' too small to be a TIFF file", filename);
        return false;
    }

    let version = match &bytes[0..2] {
        b"II" | b"EP" => read_u16_le(&bytes[2..4]),
        b"MM" => read_u16_be(&bytes[2..4]),
        _ => {
            info!("'{}' does not carry a TIFF magic number", filename);
            return false;
        }
    };

    let min_len = match version {
        42 => TIFF_MIN_LEN,
        43 => BIGTIFF_MIN_LEN,
        _ => {
            info!("'{}' does not carry a valid TIFF version", filename);
            return false;
        }
    };

    if bytes.len() < min_len {
        info!("'{}' too small to be a TIFF file", filename);
        return false;
    }

    info!("'{}' has a valid TIFF header", filename);
    true
}

// =============================================================================
// Detection
// =============================================================================

type Probe = fn(&str, &[u8]) -> bool;

/// Probes in priority order. First match wins.
const PROBES: [(DocumentFormat, Probe); 6] = [
    (DocumentFormat::Pdf, is_pdf),
    (DocumentFormat::Ps, is_ps),
    (DocumentFormat::Djvu, is_djvu),
    (DocumentFormat::ComicBook, is_cb),
    (DocumentFormat::Epub, is_epub),
    (DocumentFormat::Tiff, is_tiff),
];

/// Identify the format of a document from its name and bytes.
///
/// Runs every supported probe in priority order and returns the first
/// format whose signature matches, or `None` when nothing matches. A
/// format whose backend is not in `caps` is skipped with an informational
/// log line and treated as a no-match.
pub fn detect(caps: &Capabilities, filename: &str, bytes: &[u8]) -> Option<DocumentFormat> {
    for (format, probe) in PROBES {
        if !caps.supports(format) {
            info!(
                "{} files not supported (backend '{}' not compiled in)",
                format.name(),
                format.name()
            );
            continue;
        }
        if probe(filename, bytes) {
            return Some(format);
        }
    }
    None
}

// =============================================================================
// Tests
// =============================================================================
