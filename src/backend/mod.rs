//! Rendering backends and their lifecycle.
//!
//! A backend is a pluggable module that takes ownership of a mapped file
//! after a successful `init` and renders it. This core only models the
//! narrow initialization contract: each backend module exposes an init
//! capability that either produces instance data or rejects the file, and
//! the [`Registry`] tracks which backends exist and whether they are
//! loaded.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            Document::open               │
//! │   (sniff, try candidate, probe all)     │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │               Registry                  │
//! │   (find by name, fixed fallback order)  │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │          BackendDescriptor              │
//! │  (init capability + load bookkeeping)   │
//! └────────────────────┬────────────────────┘
//!                      │
//!      ┌──────┬────────┼────────┬──────┬──────┐
//!      ▼      ▼        ▼        ▼      ▼      ▼
//!     pdf     ps      djvu      cb    epub   tiff
//! ```
//!
//! Instance data is a tagged union over the backend variants rather than an
//! untyped handle, so no caller ever casts.

pub mod cb;
pub mod djvu;
pub mod epub;
pub mod pdf;
pub mod ps;
mod registry;
pub mod tiff;

use std::sync::Mutex;

use tracing::debug;

use crate::error::BackendInitError;
use crate::io::MappedFile;

pub use cb::{ArchiveKind, CbInstance};
pub use djvu::{DjvuInstance, DjvuKind};
pub use epub::EpubInstance;
pub use pdf::PdfInstance;
pub use ps::PsInstance;
pub use registry::Registry;
pub use tiff::{ByteOrder, TiffInstance};

// =============================================================================
// BackendInstance
// =============================================================================

/// Instance data produced by a backend's init capability.
///
/// One variant per backend; each carries the minimal owned state the
/// backend derived from the file's header. Nothing here borrows from the
/// mapping, so drop order between instance and mapping is unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendInstance {
    Pdf(pdf::PdfInstance),
    Ps(ps::PsInstance),
    Djvu(djvu::DjvuInstance),
    ComicBook(cb::CbInstance),
    Epub(epub::EpubInstance),
    Tiff(tiff::TiffInstance),
}

impl BackendInstance {
    /// Name of the backend that produced this instance.
    pub fn backend_name(&self) -> &'static str {
        match self {
            BackendInstance::Pdf(_) => "pdf",
            BackendInstance::Ps(_) => "ps",
            BackendInstance::Djvu(_) => "djvu",
            BackendInstance::ComicBook(_) => "cb",
            BackendInstance::Epub(_) => "epub",
            BackendInstance::Tiff(_) => "tiff",
        }
    }
}

// =============================================================================
// BackendDescriptor
// =============================================================================

/// The init capability: inspects the mapped file and either produces
/// instance data or rejects it.
pub type InitFn = Box<dyn Fn(&MappedFile) -> Result<BackendInstance, BackendInitError> + Send + Sync>;

/// Registry entry for one backend: its name, its init capability, and the
/// load bookkeeping shared by every document bound to it.
///
/// Load state is a reference count guarded by a mutex so that documents of
/// the same type opened from different threads stay balanced. The first
/// `init` loads the backend; `unload` at count zero is a no-op.
pub struct BackendDescriptor {
    name: &'static str,
    init_fn: InitFn,
    loads: Mutex<usize>,
}

impl BackendDescriptor {
    /// Create a descriptor for `name` with the given init capability.
    pub fn new(
        name: &'static str,
        init_fn: impl Fn(&MappedFile) -> Result<BackendInstance, BackendInitError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            name,
            init_fn: Box::new(init_fn),
            loads: Mutex::new(0),
        }
    }

    /// The backend's registry name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Load the backend and run its init capability on `file`.
    ///
    /// A rejection is a normal negative outcome: the load taken for this
    /// attempt is released again and the error describes why the file did
    /// not satisfy the backend. On success the caller owns one load and
    /// must balance it with [`BackendDescriptor::unload`].
    pub fn init(&self, file: &MappedFile) -> Result<BackendInstance, BackendInitError> {
        self.load();
        match (self.init_fn)(file) {
            Ok(instance) => {
                debug!("backend '{}' accepted '{}'", self.name, file.filename());
                Ok(instance)
            }
            Err(err) => {
                self.unload();
                Err(err)
            }
        }
    }

    /// Release one load. Idempotent at zero: unloading an unloaded backend
    /// is a no-op, not an error.
    pub fn unload(&self) {
        let mut loads = self.loads.lock().unwrap();
        if *loads > 0 {
            *loads -= 1;
            if *loads == 0 {
                debug!("backend '{}' unloaded", self.name);
            }
        }
    }

    /// Whether any document currently holds this backend loaded.
    pub fn is_loaded(&self) -> bool {
        *self.loads.lock().unwrap() > 0
    }

    /// Current load count (mainly for lifecycle assertions in tests).
    pub fn load_count(&self) -> usize {
        *self.loads.lock().unwrap()
    }

    fn load(&self) {
        let mut loads = self.loads.lock().unwrap();
        if *loads == 0 {
            debug!("backend '{}' loaded", self.name);
        }
        *loads += 1;
    }
}

impl std::fmt::Debug for BackendDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendDescriptor")
            .field("name", &self.name)
            .field("loads", &self.load_count())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
