//! Signature detection over real files on disk.
//!
//! The unit tests in `format::sniff` cover each probe's byte-exact rules;
//! these tests run `detect` against mapped files the way the dispatcher
//! does.

use pagedock::{detect, Capabilities, DocumentFormat, MappedFile};

use super::test_utils::{
    bigtiff_bytes, cbr_bytes, cbz_bytes, djvu_bytes, epub_bytes, pdf_bytes,
    pdf_bytes_with_junk_prefix, ps_bytes, tiff_bytes, DocDir,
};

fn detect_file(name: &str, bytes: &[u8]) -> Option<DocumentFormat> {
    let docs = DocDir::new();
    let path = docs.write(name, bytes);
    let file = MappedFile::open(&path).unwrap();
    detect(&Capabilities::all(), file.filename(), file.bytes())
}

#[test]
fn test_detect_every_supported_format() {
    assert_eq!(detect_file("a.pdf", &pdf_bytes()), Some(DocumentFormat::Pdf));
    assert_eq!(detect_file("a.ps", &ps_bytes()), Some(DocumentFormat::Ps));
    assert_eq!(detect_file("a.djvu", &djvu_bytes()), Some(DocumentFormat::Djvu));
    assert_eq!(detect_file("a.cbr", &cbr_bytes()), Some(DocumentFormat::ComicBook));
    assert_eq!(detect_file("a.cbz", &cbz_bytes()), Some(DocumentFormat::ComicBook));
    assert_eq!(detect_file("a.epub", &epub_bytes()), Some(DocumentFormat::Epub));
    assert_eq!(detect_file("a.tiff", &tiff_bytes()), Some(DocumentFormat::Tiff));
    assert_eq!(detect_file("a.tiff", &bigtiff_bytes()), Some(DocumentFormat::Tiff));
}

#[test]
fn test_detect_pdf_with_trailing_garbage() {
    let mut data = pdf_bytes();
    data.extend_from_slice(&[0xFF; 256]);
    assert_eq!(detect_file("a.pdf", &data), Some(DocumentFormat::Pdf));
}

#[test]
fn test_detect_pdf_signature_inside_first_kb() {
    assert_eq!(
        detect_file("a.pdf", &pdf_bytes_with_junk_prefix(700)),
        Some(DocumentFormat::Pdf)
    );
    // Past the kilobyte window the signature no longer counts.
    assert_eq!(detect_file("a.pdf", &pdf_bytes_with_junk_prefix(1024)), None);
}

#[test]
fn test_detect_respects_comic_book_extension_gate() {
    // Same RAR bytes: the extension decides.
    assert_eq!(detect_file("book.cbr", &cbr_bytes()), Some(DocumentFormat::ComicBook));
    assert_eq!(detect_file("book.txt", &cbr_bytes()), None);
}

#[test]
fn test_detect_unknown_content() {
    assert_eq!(detect_file("notes.txt", b"plain text, nothing special"), None);
    assert_eq!(detect_file("empty.bin", b""), None);
}

#[test]
fn test_detect_tiff_minimum_sizes() {
    let tiff = tiff_bytes();
    assert_eq!(detect_file("a.tif", &tiff[..8]), Some(DocumentFormat::Tiff));
    assert_eq!(detect_file("a.tif", &tiff[..6]), None);
}
