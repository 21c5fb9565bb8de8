//! The open protocol: from a path to a bound (file, backend) pair.
//!
//! Opening runs in two phases. The signature sniffer yields a best-guess
//! backend name from the mapped bytes, and that backend is tried first;
//! when it rejects the file (or nothing was guessed), every registered
//! backend is probed in registry order until one accepts. A backend may
//! be probed twice along the way (once as candidate, once during
//! fallback), an accepted redundancy.
//!
//! The protocol is synchronous: each step blocks until it completes, and
//! either a fully bound [`Document`] comes back or everything acquired on
//! the way (mapping, backend load) has been released.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::backend::{BackendDescriptor, BackendInstance, Registry};
use crate::error::OpenError;
use crate::format::{sniff, Capabilities};
use crate::io::MappedFile;

/// An opened document: the mapped file bound to the backend that accepted
/// it.
///
/// The caller owns the document exclusively. Dropping it unloads the
/// backend first and releases the byte mapping second: a backend may hold
/// references into the mapped bytes, so the order is fixed.
pub struct Document<'r> {
    file: MappedFile,
    backend: &'r BackendDescriptor,
    instance: BackendInstance,
}

impl<'r> Document<'r> {
    /// Open the document at `input` (a path or `file://` URI) and bind it
    /// to a backend from `registry`.
    ///
    /// # Errors
    ///
    /// [`OpenError::PathResolution`] and [`OpenError::Map`] for the two
    /// acquisition steps, [`OpenError::NoMatchingBackend`] when the
    /// candidate and every fallback backend rejected the file. Individual
    /// backend rejections are logged, not surfaced.
    pub fn open(
        registry: &'r Registry,
        caps: &Capabilities,
        input: &str,
    ) -> Result<Document<'r>, OpenError> {
        let file = MappedFile::open(input)?;

        let candidate = sniff::detect(caps, file.filename(), file.bytes());
        match candidate {
            Some(format) => info!("best-guess backend: {}", format.name()),
            None => info!("no signature matched '{}'", file.filename()),
        }

        // Phase one: the sniffed candidate, if any.
        if let Some(format) = candidate {
            if let Some(backend) = registry.find(format.name()) {
                match backend.init(&file) {
                    Ok(instance) => {
                        return Ok(Document {
                            file,
                            backend,
                            instance,
                        })
                    }
                    Err(err) => debug!("candidate rejected: {err}"),
                }
            } else {
                debug!("backend '{}' not registered", format.name());
            }
        }

        // Phase two: exhaustive fallback in registry order.
        for backend in registry.iter() {
            debug!("probing backend '{}'", backend.name());
            match backend.init(&file) {
                Ok(instance) => {
                    return Ok(Document {
                        file,
                        backend,
                        instance,
                    })
                }
                Err(err) => debug!("{err}"),
            }
        }

        warn!("no backend accepts '{}'", file.filename());
        // `file` drops here, releasing the mapping; every attempted
        // backend already released its load on rejection.
        Err(OpenError::NoMatchingBackend {
            path: file.path().to_path_buf(),
        })
    }

    /// Canonical absolute path of the document.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Canonical path as a string.
    pub fn filename(&self) -> &str {
        self.file.filename()
    }

    /// The immutable mapped bytes.
    pub fn bytes(&self) -> &[u8] {
        self.file.bytes()
    }

    /// Byte length of the document.
    pub fn len(&self) -> usize {
        self.file.len()
    }

    /// Whether the document is empty.
    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }

    /// The backend this document is bound to.
    pub fn backend(&self) -> &BackendDescriptor {
        self.backend
    }

    /// Instance data produced by the backend's init.
    pub fn instance(&self) -> &BackendInstance {
        &self.instance
    }

    /// Close the document, unloading the backend and releasing the
    /// mapping. Equivalent to dropping it.
    pub fn close(self) {}
}

impl Drop for Document<'_> {
    fn drop(&mut self) {
        // Unload before the mapping goes away; `file` is dropped after
        // this body runs.
        self.backend.unload();
        debug!("closed '{}'", self.file.filename());
    }
}

impl std::fmt::Debug for Document<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.file.path())
            .field("len", &self.file.len())
            .field("backend", &self.backend.name())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
