//! Registry builder properties

use errid::registry::{Numbering, Ordinal, RegistryBuilder, RegistryError};
use proptest::prelude::*;

/// Strategy for generating distinct kind names
fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[A-DF-Z][a-zA-Z0-9]{0,12}", 1..40)
        .prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_ordinals_match_registration_order(names in names_strategy(), offset in 0u32..4) {
        let mut builder = RegistryBuilder::new(Numbering::new(offset));
        for i in 0..offset {
            builder.register_sentinel(format!("Sentinel{}", i)).unwrap();
        }
        for name in &names {
            prop_assume!(!name.starts_with("Sentinel"));
            builder.register(name.clone()).unwrap();
        }
        let registry = builder.finish().unwrap();

        prop_assert_eq!(registry.len(), names.len() + offset as usize);
        for (position, kind) in registry.iter().enumerate() {
            prop_assert_eq!(kind.ordinal(), Ordinal::new(position as u32));
            prop_assert_eq!(kind.error_number().get(), position as i32 - offset as i32);
            let back = registry.lookup_by_error_number(kind.error_number()).unwrap();
            prop_assert_eq!(back.name(), kind.name());
        }
    }

    #[test]
    fn prop_retired_ordinal_is_never_reused(
        names in names_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut builder = RegistryBuilder::new(Numbering::new(0));
        for name in &names {
            builder.register(name.clone()).unwrap();
        }
        let victim = pick.get(&names).clone();
        let retired = builder.retire(&victim).unwrap().ordinal();

        let fresh = builder.register("FreshKind_").unwrap().ordinal();
        prop_assert_ne!(fresh, retired);
        prop_assert_eq!(fresh, Ordinal::new(names.len() as u32));

        let again = builder.register(victim.clone());
        let is_duplicate = matches!(again, Err(RegistryError::DuplicateName { .. }));
        prop_assert!(is_duplicate);
        prop_assert!(builder.finish().is_ok());
    }
}

#[test]
fn test_duplicate_registration_leaves_no_trace() {
    let mut builder = RegistryBuilder::new(Numbering::REFERENCE);
    builder.register_sentinel("LazyError").unwrap();
    builder.register_sentinel("NoExplanation").unwrap();
    builder.register("TypeMismatch").unwrap();

    assert!(matches!(
        builder.register("TypeMismatch"),
        Err(RegistryError::DuplicateName { .. })
    ));
    assert!(matches!(
        builder.register_sentinel("LazyError"),
        Err(RegistryError::DuplicateName { .. })
    ));
    assert_eq!(builder.len(), 3);

    let registry = builder.finish().unwrap();
    assert_eq!(registry.len(), 3);
    assert_eq!(
        registry.lookup_by_name("TypeMismatch").unwrap().ordinal(),
        Ordinal::new(2)
    );
}
