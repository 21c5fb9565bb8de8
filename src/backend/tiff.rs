//! TIFF backend initialization.
//!
//! # TIFF Header Structure
//!
//! ## Classic TIFF (8 bytes)
//! ```text
//! Bytes 0-1: Byte order ("II" little-endian, "MM" big-endian, "EP" MDI)
//! Bytes 2-3: Version (42)
//! Bytes 4-7: Offset to first IFD
//! ```
//!
//! ## BigTIFF (16 bytes)
//! ```text
//! Bytes 0-1: Byte order
//! Bytes 2-3: Version (43)
//! Bytes 4-5: Offset byte size (must be 8)
//! Bytes 6-7: Reserved
//! Bytes 8-15: Offset to first IFD
//! ```

use crate::error::BackendInitError;
use crate::io::MappedFile;

use super::BackendInstance;

/// Size of a classic TIFF header in bytes.
const TIFF_HEADER_SIZE: usize = 8;

/// Size of a BigTIFF header in bytes.
const BIGTIFF_HEADER_SIZE: usize = 16;

const VERSION_TIFF: u16 = 42;
const VERSION_BIGTIFF: u16 = 43;

/// Byte order declared by a TIFF file's magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// "II" (Intel) and the MDI "EP" marker.
    LittleEndian,
    /// "MM" (Motorola).
    BigEndian,
}

impl ByteOrder {
    #[inline]
    fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes([bytes[0], bytes[1]]),
            ByteOrder::BigEndian => u16::from_be_bytes([bytes[0], bytes[1]]),
        }
    }

    #[inline]
    fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            ByteOrder::BigEndian => u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        }
    }

    #[inline]
    fn read_u64(self, bytes: &[u8]) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&bytes[..8]);
        match self {
            ByteOrder::LittleEndian => u64::from_le_bytes(buf),
            ByteOrder::BigEndian => u64::from_be_bytes(buf),
        }
    }
}

/// Instance data for the TIFF backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffInstance {
    /// Byte order for all multi-byte values in the file.
    pub byte_order: ByteOrder,
    /// Whether this is a BigTIFF file (64-bit offsets).
    pub is_bigtiff: bool,
    /// Offset of the first IFD; validated to lie inside the file.
    pub first_ifd_offset: u64,
}

/// Init capability for the "tiff" backend. Parses and validates the full
/// header, which is stricter than the sniffer's magic check: a file whose
/// first IFD offset points outside the file is rejected here.
pub(crate) fn init(file: &MappedFile) -> Result<BackendInstance, BackendInitError> {
    let bytes = file.bytes();
    if bytes.len() < TIFF_HEADER_SIZE {
        return Err(BackendInitError::new("tiff", "file too small for a TIFF header"));
    }

    let byte_order = match &bytes[0..2] {
        b"II" | b"EP" => ByteOrder::LittleEndian,
        b"MM" => ByteOrder::BigEndian,
        _ => return Err(BackendInitError::new("tiff", "no TIFF magic number")),
    };

    let version = byte_order.read_u16(&bytes[2..4]);
    let (is_bigtiff, first_ifd_offset) = match version {
        VERSION_TIFF => {
            let offset = byte_order.read_u32(&bytes[4..8]) as u64;
            (false, offset)
        }
        VERSION_BIGTIFF => {
            if bytes.len() < BIGTIFF_HEADER_SIZE {
                return Err(BackendInitError::new("tiff", "file too small for a BigTIFF header"));
            }
            let offset_size = byte_order.read_u16(&bytes[4..6]);
            if offset_size != 8 {
                return Err(BackendInitError::new(
                    "tiff",
                    format!("invalid BigTIFF offset size: {offset_size}"),
                ));
            }
            let offset = byte_order.read_u64(&bytes[8..16]);
            (true, offset)
        }
        other => {
            return Err(BackendInitError::new(
                "tiff",
                format!("invalid TIFF version: {other}"),
            ))
        }
    };

    if first_ifd_offset >= bytes.len() as u64 {
        return Err(BackendInitError::new(
            "tiff",
            format!("first IFD offset {first_ifd_offset} outside the file"),
        ));
    }

    Ok(BackendInstance::Tiff(TiffInstance {
        byte_order,
        is_bigtiff,
        first_ifd_offset,
    }))
}
