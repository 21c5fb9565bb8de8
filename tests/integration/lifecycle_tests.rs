//! Resource safety across the open protocol.
//!
//! Every path through an open (success, each failure state) must leave
//! the mapping released exactly once and the backend load counts
//! balanced.

use pagedock::{BackendInstance, Capabilities, Document, Registry};

use super::test_utils::{djvu_bytes, pdf_bytes, probe_log, rejecting_backend, DocDir};

#[test]
fn test_successful_open_holds_one_load_until_close() {
    let registry = Registry::with_compiled_backends();
    let caps = Capabilities::all();
    let docs = DocDir::new();

    let path = docs.write("report.pdf", &pdf_bytes());
    let backend = registry.find("pdf").unwrap();
    assert_eq!(backend.load_count(), 0);

    let doc = Document::open(&registry, &caps, &path).unwrap();
    assert_eq!(backend.load_count(), 1);
    assert!(backend.is_loaded());

    doc.close();
    assert_eq!(backend.load_count(), 0);
    assert!(!backend.is_loaded());
}

#[test]
fn test_drop_unloads_like_close() {
    let registry = Registry::with_compiled_backends();
    let caps = Capabilities::all();
    let docs = DocDir::new();

    let path = docs.write("report.pdf", &pdf_bytes());
    {
        let _doc = Document::open(&registry, &caps, &path).unwrap();
        assert!(registry.find("pdf").unwrap().is_loaded());
    }
    assert!(!registry.find("pdf").unwrap().is_loaded());
}

#[test]
fn test_concurrent_documents_reference_count_the_backend() {
    let registry = Registry::with_compiled_backends();
    let caps = Capabilities::all();
    let docs = DocDir::new();

    let path_a = docs.write("a.pdf", &pdf_bytes());
    let path_b = docs.write("b.pdf", &pdf_bytes());
    let backend = registry.find("pdf").unwrap();

    let doc_a = Document::open(&registry, &caps, &path_a).unwrap();
    let doc_b = Document::open(&registry, &caps, &path_b).unwrap();
    assert_eq!(backend.load_count(), 2);

    doc_a.close();
    assert_eq!(backend.load_count(), 1);
    assert!(backend.is_loaded());

    doc_b.close();
    assert_eq!(backend.load_count(), 0);
}

#[test]
fn test_failed_open_leaves_no_loads_behind() {
    let registry = Registry::with_compiled_backends();
    let caps = Capabilities::all();
    let docs = DocDir::new();

    // Sniffs as djvu, rejected by the djvu backend, then rejected by the
    // whole fallback pass.
    let path = docs.write("tiny.djvu", &djvu_bytes()[..4]);
    assert!(Document::open(&registry, &caps, &path).is_err());

    for backend in registry.iter() {
        assert_eq!(backend.load_count(), 0, "{}", backend.name());
    }
}

#[test]
fn test_rejecting_registry_leaves_no_loads_behind() {
    let log = probe_log();
    let registry = Registry::from_descriptors(vec![
        rejecting_backend("pdf", &log),
        rejecting_backend("ps", &log),
    ]);
    let caps = Capabilities::all();
    let docs = DocDir::new();

    let path = docs.write("mystery.dat", b"unrecognizable");
    assert!(Document::open(&registry, &caps, &path).is_err());

    for backend in registry.iter() {
        assert_eq!(backend.load_count(), 0, "{}", backend.name());
    }
}

#[test]
fn test_document_accessors_reflect_the_mapped_file() {
    let registry = Registry::with_compiled_backends();
    let caps = Capabilities::all();
    let docs = DocDir::new();

    let bytes = pdf_bytes();
    let path = docs.write("report.pdf", &bytes);
    let doc = Document::open(&registry, &caps, &path).unwrap();

    assert_eq!(doc.len(), bytes.len());
    assert!(!doc.is_empty());
    assert_eq!(doc.bytes(), &bytes[..]);
    assert!(doc.path().is_absolute());
    assert!(doc.filename().ends_with("report.pdf"));

    match doc.instance() {
        BackendInstance::Pdf(instance) => {
            assert_eq!(instance.version, 4);
            assert_eq!(instance.header_offset, 0);
        }
        other => panic!("unexpected instance: {other:?}"),
    }
}
