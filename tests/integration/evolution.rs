//! Catalog evolution tests
//!
//! The shipped catalog must stay compatible with the checked-in snapshot of
//! the last published numbering.

use errid::catalog::{build_catalog, catalog};
use errid::registry::{Numbering, Ordinal, RegistryBuilder};
use errid::snapshot::{check_evolution, CatalogSnapshot, EvolutionViolation};

const PUBLISHED: &str = include_str!("../../catalog/error_message_ids.json");

fn published() -> CatalogSnapshot {
    CatalogSnapshot::from_json(PUBLISHED).unwrap()
}

#[test]
fn test_catalog_validates() {
    build_catalog().unwrap();
}

#[test]
fn test_catalog_matches_published_snapshot() {
    let report = check_evolution(&published(), catalog()).unwrap();
    assert!(
        report.is_unchanged(),
        "catalog changed since the last snapshot; run `errid snapshot` ({:?})",
        report
    );
    assert_eq!(CatalogSnapshot::capture(catalog()), published());
}

#[test]
fn test_appending_to_published_catalog_is_accepted() {
    let snapshot = published();
    let mut builder = RegistryBuilder::new(Numbering::REFERENCE);
    errid::ErrorMessageId::register_all(&mut builder).unwrap();
    builder.register("UnreducibleApplication").unwrap();
    let next = builder.finish().unwrap();

    let report = check_evolution(&snapshot, &next).unwrap();
    assert_eq!(report.appended.len(), 1);
    assert_eq!(report.appended[0].ordinal, Ordinal::new(89));
    assert_eq!(report.appended[0].error_number.to_string(), "E087");
}

#[test]
fn test_retiring_from_published_catalog_is_accepted() {
    let mut builder = RegistryBuilder::new(Numbering::REFERENCE);
    errid::ErrorMessageId::register_all(&mut builder).unwrap();
    builder.retire("TupleTooLong").unwrap();
    let next = builder.finish().unwrap();

    let report = check_evolution(&published(), &next).unwrap();
    assert_eq!(report.retired.len(), 1);
    assert_eq!(report.retired[0].former_name.as_deref(), Some("TupleTooLong"));
    assert!(report.appended.is_empty());
}

#[test]
fn test_inserting_in_the_middle_is_rejected() {
    let snapshot = published();
    let mut builder = RegistryBuilder::new(Numbering::REFERENCE);
    for entry in &snapshot.entries {
        if entry.ordinal == Ordinal::new(5) {
            builder.register("SneakedIn").unwrap();
        }
        match (entry.sentinel, entry.retired) {
            (true, _) => {
                builder.register_sentinel(entry.name.clone()).unwrap();
            }
            (_, true) => {
                let former = entry.former_name.clone().unwrap();
                builder.register(former.clone()).unwrap();
                builder.retire(&former).unwrap();
            }
            _ => {
                builder.register(entry.name.clone()).unwrap();
            }
        }
    }
    let next = builder.finish().unwrap();

    let err = check_evolution(&snapshot, &next).unwrap_err();
    assert!(err.violations.iter().any(|v| matches!(
        v,
        EvolutionViolation::Moved { name, .. } if name == "DeprecatedWithOperator"
    )));
}
