//! Helpers shared by unit tests: temp files on disk for the mmap-based
//! open path, and canned sample buffers.

use std::io::Write;

use crate::io::MappedFile;

/// Write `bytes` to an anonymous temp file and map it. The guard keeps the
/// file alive for the test's duration.
pub(crate) fn mapped_file(bytes: &[u8]) -> (MappedFile, tempfile::NamedTempFile) {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(bytes).unwrap();
    let file = MappedFile::open(tmp.path().to_str().unwrap()).unwrap();
    (file, tmp)
}

/// Write `bytes` to `name` inside a fresh temp dir and return the path.
/// Use when the file name matters (extension-gated formats).
pub(crate) fn write_named(name: &str, bytes: &[u8]) -> (String, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    (path.to_string_lossy().into_owned(), dir)
}

/// Like [`write_named`] but returns the file already mapped.
pub(crate) fn mapped_file_named(name: &str, bytes: &[u8]) -> (MappedFile, tempfile::TempDir) {
    let (path, dir) = write_named(name, bytes);
    (MappedFile::open(&path).unwrap(), dir)
}

/// A minimal EPUB container start: ZIP local file header for a stored,
/// unencrypted "mimetype" entry, plus some trailing payload.
pub(crate) fn epub_bytes() -> Vec<u8> {
    let mut buf = vec![0u8; 64];
    buf[0..4].copy_from_slice(&0x0403_4b50u32.to_le_bytes());
    buf[4..6].copy_from_slice(&20u16.to_le_bytes()); // version needed
    buf[8..10].copy_from_slice(&0u16.to_le_bytes()); // stored
    buf[18..22].copy_from_slice(&20u32.to_le_bytes()); // compressed size
    buf[22..26].copy_from_slice(&20u32.to_le_bytes()); // uncompressed size
    buf[26..28].copy_from_slice(&8u16.to_le_bytes()); // name length
    buf[28..30].copy_from_slice(&0u16.to_le_bytes()); // extra length
    buf[30..38].copy_from_slice(b"mimetype");
    buf[38..58].copy_from_slice(b"application/epub+zip");
    buf
}
