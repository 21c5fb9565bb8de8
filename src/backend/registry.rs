//! Process-wide catalog of compiled-in backends.
//!
//! The registry is constructed once at startup and passed by reference
//! into the dispatcher; there is no ambient global state. Its enumeration
//! order is the build order, and that order is significant: it is the
//! fallback-probe sequence the dispatcher walks when the sniffed
//! candidate is wrong or absent.

use super::BackendDescriptor;
use super::{cb, djvu, epub, pdf, ps, tiff};

/// Ordered catalog of backend descriptors.
pub struct Registry {
    entries: Vec<BackendDescriptor>,
}

impl Registry {
    /// Registry of every backend compiled into this build, in build order.
    pub fn with_compiled_backends() -> Self {
        let mut entries: Vec<BackendDescriptor> = Vec::new();

        if cfg!(feature = "pdf") {
            entries.push(BackendDescriptor::new("pdf", pdf::init));
        }
        if cfg!(feature = "ps") {
            entries.push(BackendDescriptor::new("ps", ps::init));
        }
        if cfg!(feature = "djvu") {
            entries.push(BackendDescriptor::new("djvu", djvu::init));
        }
        if cfg!(feature = "cb") {
            entries.push(BackendDescriptor::new("cb", cb::init));
        }
        if cfg!(feature = "epub") {
            entries.push(BackendDescriptor::new("epub", epub::init));
        }
        if cfg!(feature = "tiff") {
            entries.push(BackendDescriptor::new("tiff", tiff::init));
        }

        Self { entries }
    }

    /// Registry with a caller-supplied set of descriptors, in the order
    /// they should be probed. Useful for embedders and tests.
    pub fn from_descriptors(entries: Vec<BackendDescriptor>) -> Self {
        Self { entries }
    }

    /// Registry with no backends at all.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Look up a backend by exact name. Absent names are `None`, not an
    /// error.
    pub fn find(&self, name: &str) -> Option<&BackendDescriptor> {
        self.entries.iter().find(|b| b.name() == name)
    }

    /// Backend names in enumeration (fallback) order.
    pub fn list(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|b| b.name())
    }

    /// Descriptors in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &BackendDescriptor> {
        self.entries.iter()
    }

    /// Number of registered backends.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no backends.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_compiled_backends()
    }
}

// =============================================================================
// Tests
// =============================================================================
