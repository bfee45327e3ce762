//! Reference catalog integration tests
//!
//! Numbering properties over the shipped `ErrorMessageId` catalog.

use errid::catalog::{catalog, ErrorMessageId, CATALOG_NUMBERING};
use errid::docs::doc_path;
use errid::registry::{ErrorNumber, Ordinal};

#[test]
fn test_ordinals_are_dense_in_declaration_order() {
    let registry = catalog();
    for (position, kind) in registry.iter().enumerate() {
        assert_eq!(kind.ordinal(), Ordinal::new(position as u32));
    }
    for (position, id) in ErrorMessageId::ALL.iter().enumerate() {
        assert_eq!(id.ordinal().index(), position);
    }
}

#[test]
fn test_first_four_numbers() {
    let numbers: Vec<i32> = ErrorMessageId::ALL[..4]
        .iter()
        .map(|id| id.error_number().get())
        .collect();
    assert_eq!(numbers, vec![-2, -1, 0, 1]);
}

#[test]
fn test_numbering_and_inverse() {
    let offset = CATALOG_NUMBERING.sentinel_offset() as i32;
    for kind in catalog() {
        let ordinal = kind.ordinal();
        assert_eq!(kind.error_number().get(), ordinal.get() as i32 - offset);
        assert_eq!(
            CATALOG_NUMBERING.ordinal_from_error_number(kind.error_number()),
            Some(ordinal)
        );
    }
}

#[test]
fn test_name_number_name_round_trip() {
    let registry = catalog();
    for kind in registry.iter().filter(|k| !k.is_retired()) {
        let number = registry.lookup_by_name(kind.name()).unwrap().error_number();
        let back = registry.lookup_by_error_number(number).unwrap();
        assert_eq!(back.name(), kind.name());
    }
}

#[test]
fn test_suppression_style_reverse_lookup() {
    // "ignore error 7"
    let id = ErrorMessageId::from_error_number(ErrorNumber::new(7)).unwrap();
    assert_eq!(id, ErrorMessageId::TypeMismatch);
    assert_eq!(id.to_string(), "TypeMismatch");
    assert_eq!(catalog().resolve("E007").unwrap().name(), "TypeMismatch");
}

#[test]
fn test_documentation_url() {
    let number = ErrorMessageId::AmbiguousImport.error_number();
    assert_eq!(number.get(), 48);
    assert_eq!(doc_path("docs/errors", number), "docs/errors/48");
}

#[test]
fn test_retired_slot_is_held() {
    let kind = catalog().lookup_by_error_number(ErrorNumber::new(42)).unwrap();
    assert!(kind.is_retired());
    assert_eq!(kind.former_name(), Some("DummyAvailable1"));
    assert_eq!(
        ErrorMessageId::OverloadedOrRecursiveMethodNeedsResultType.error_number().get(),
        43
    );
}

#[test]
fn test_catalog_is_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                catalog()
                    .lookup_by_name("MissingIdent")
                    .map(|k| k.error_number().get())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(6));
    }
}
