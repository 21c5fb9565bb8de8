//! Comic book backend initialization.
//!
//! Comic books are ordinary archives of page images; the extension names
//! the container. The archive reader behind the init contract needs to
//! know which container to open, so the instance data records the kind.

use crate::error::BackendInitError;
use crate::format::sniff::has_extension;
use crate::io::MappedFile;

use super::BackendInstance;

const RAR_MAGIC: [u8; 4] = [b'R', b'a', b'r', b'!'];
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const SEVENZ_MAGIC: [u8; 6] = [0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C];

/// Archive container of a comic book file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Rar,
    Zip,
    SevenZ,
    Tar,
    Ace,
}

impl ArchiveKind {
    pub const fn name(&self) -> &'static str {
        match self {
            ArchiveKind::Rar => "rar",
            ArchiveKind::Zip => "zip",
            ArchiveKind::SevenZ => "7z",
            ArchiveKind::Tar => "tar",
            ArchiveKind::Ace => "ace",
        }
    }
}

/// Instance data for the comic book backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CbInstance {
    pub archive: ArchiveKind,
}

/// Init capability for the "cb" backend. Extension-gated like the sniffer:
/// `.cbr`/`.cbz`/`.cb7` must also carry their container magic, `.cbt` and
/// `.cba` are taken on the extension alone.
pub(crate) fn init(file: &MappedFile) -> Result<BackendInstance, BackendInitError> {
    let filename = file.filename();
    let bytes = file.bytes();

    let archive = if has_extension(filename, "cbr") && bytes.len() >= 4 && bytes[..4] == RAR_MAGIC {
        ArchiveKind::Rar
    } else if has_extension(filename, "cbz") && bytes.len() >= 4 && bytes[..4] == ZIP_MAGIC {
        ArchiveKind::Zip
    } else if has_extension(filename, "cb7") && bytes.len() >= 6 && bytes[..6] == SEVENZ_MAGIC {
        ArchiveKind::SevenZ
    } else if has_extension(filename, "cbt") {
        ArchiveKind::Tar
    } else if has_extension(filename, "cba") {
        ArchiveKind::Ace
    } else {
        return Err(BackendInitError::new(
            "cb",
            "not a recognized comic book archive",
        ));
    };

    Ok(BackendInstance::ComicBook(CbInstance { archive }))
}
