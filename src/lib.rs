//! # pagedock
//!
//! Document open and dispatch core for a multi-format viewer.
//!
//! pagedock takes a user-supplied file of unknown type, determines from its
//! content and name which rendering backend can handle it, and hands the
//! backend an immutable view of the file's bytes. Rendering itself is out
//! of scope: backends are consumed only through their narrow
//! initialization contract.
//!
//! ## Features
//!
//! - **Byte-exact signature sniffing** across six container formats:
//!   PDF, PostScript, DjVu, comic-book archives, EPUB and TIFF
//! - **Two-phase dispatch**: the sniffed best guess is tried first, then
//!   every registered backend in a fixed fallback order
//! - **Memory-mapped input**: a document's bytes are mapped read-only once
//!   and shared by the sniffer, the dispatcher and the bound backend
//! - **Build-time backend selection**: each backend is a cargo feature;
//!   the sniffer consults the resulting capability set at runtime
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`io`] - File resolution and read-only memory mapping
//! - [`mod@format`] - Format vocabulary, capabilities and the signature sniffer
//! - [`backend`] - Backend descriptors, registry and per-format init
//! - [`document`] - The open protocol and the bound document handle
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use pagedock::{Capabilities, Document, Registry};
//!
//! fn main() -> Result<(), pagedock::OpenError> {
//!     let registry = Registry::with_compiled_backends();
//!     let caps = Capabilities::from_build();
//!
//!     let doc = Document::open(&registry, &caps, "file:///books/novel.epub")?;
//!     println!("{} -> {}", doc.filename(), doc.backend().name());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod io;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use backend::{
    ArchiveKind, BackendDescriptor, BackendInstance, ByteOrder, CbInstance, DjvuInstance,
    DjvuKind, EpubInstance, PdfInstance, PsInstance, Registry, TiffInstance,
};
pub use config::{BackendsConfig, Cli, Command, DetectConfig, OpenConfig, OutputFormat};
pub use document::Document;
pub use error::{BackendInitError, OpenError};
pub use format::{detect, Capabilities, DocumentFormat};
pub use io::MappedFile;
