//! Document format identification.
//!
//! This module owns the vocabulary of supported formats and the signature
//! sniffer that maps a file's bytes (and name) to the backend able to
//! render it.
//!
//! # Format Detection
//!
//! Use [`sniff::detect`] to identify a document's format. Detection runs a
//! fixed set of pure signature probes in priority order (PDF, PostScript,
//! DjVu, comic book, EPUB, TIFF) and returns the first match. Whether a
//! probe is consulted at all depends on the [`Capabilities`] resolved from
//! the build features: a format whose backend was not compiled in always
//! reports no-match.

pub mod sniff;

pub use sniff::detect;

// =============================================================================
// DocumentFormat
// =============================================================================

/// A supported document format, one per rendering backend.
///
/// The declaration order is the build order: it is both the sniffer's probe
/// priority and the registry's fallback enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Document Format
    Pdf,
    /// PostScript (DSC-conforming)
    Ps,
    /// DjVu
    Djvu,
    /// Comic book archive (cbr/cbz/cb7/cbt/cba)
    ComicBook,
    /// EPUB (ZIP container with an epub mimetype entry)
    Epub,
    /// TIFF, BigTIFF, or MDI
    Tiff,
}

impl DocumentFormat {
    /// All formats in build order.
    pub const ALL: [DocumentFormat; 6] = [
        DocumentFormat::Pdf,
        DocumentFormat::Ps,
        DocumentFormat::Djvu,
        DocumentFormat::ComicBook,
        DocumentFormat::Epub,
        DocumentFormat::Tiff,
    ];

    /// The backend name for this format.
    ///
    /// These identifiers are the stable vocabulary shared with the registry
    /// and the build configuration; renaming one breaks registry lookup.
    pub const fn name(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Ps => "ps",
            DocumentFormat::Djvu => "djvu",
            DocumentFormat::ComicBook => "cb",
            DocumentFormat::Epub => "epub",
            DocumentFormat::Tiff => "tiff",
        }
    }

    /// Look up a format by its backend name.
    pub fn from_name(name: &str) -> Option<DocumentFormat> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// The set of formats whose backends were compiled into this build.
///
/// Resolved once at startup from the cargo features and passed by reference
/// wherever support matters; probe logic itself carries no conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    supported: [bool; 6],
}

impl Capabilities {
    /// Capabilities of the current build.
    pub fn from_build() -> Self {
        Self {
            supported: [
                cfg!(feature = "pdf"),
                cfg!(feature = "ps"),
                cfg!(feature = "djvu"),
                cfg!(feature = "cb"),
                cfg!(feature = "epub"),
                cfg!(feature = "tiff"),
            ],
        }
    }

    /// Every format supported. Useful for exercising the sniffer in tests
    /// independently of the build's feature set.
    pub fn all() -> Self {
        Self {
            supported: [true; 6],
        }
    }

    /// No format supported.
    pub fn none() -> Self {
        Self {
            supported: [false; 6],
        }
    }

    /// Whether `format`'s backend is available in this build.
    pub fn supports(&self, format: DocumentFormat) -> bool {
        self.supported[format as usize]
    }

    /// Return a copy with `format` switched off.
    pub fn without(mut self, format: DocumentFormat) -> Self {
        self.supported[format as usize] = false;
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
