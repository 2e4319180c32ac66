//! # Catalogue behaviour tests
//!
//! End-to-end checks through the public API:
//! - priority selection and first-registered tie-break
//! - memoization (same shared value, predicates run once)
//! - scan errors leave the registry untouched

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use samples::{Customer, Order};
use uifor::{
    builtins, Applicability, Assembly, Catalogue, CatalogueError, ComponentDescriptor, FieldInfo,
    Model, OwnerType, TypeKey, UiFor,
};

#[allow(dead_code)]
#[path = "../src/samples.rs"]
mod samples;

// ============================================================================
// TEST HELPERS
// ============================================================================

struct Label;

impl Model for Label {
    fn fields() -> Vec<FieldInfo> {
        vec![
            FieldInfo::public::<Label, String>("Caption"),
            FieldInfo::public::<Label, String>("Tooltip"),
        ]
    }
}

struct Unbound;

impl Model for Unbound {}

struct FirstText;
struct SecondText;

impl UiFor<String> for FirstText {
    fn is_ui_for(_: Option<&OwnerType>, _: Option<&FieldInfo>) -> Applicability {
        Applicability::supported(4)
    }
}

impl UiFor<String> for SecondText {
    fn is_ui_for(_: Option<&OwnerType>, _: Option<&FieldInfo>) -> Applicability {
        Applicability::supported(4)
    }
}

struct DualEditor;

impl UiFor<i32> for DualEditor {
    fn is_ui_for(_: Option<&OwnerType>, _: Option<&FieldInfo>) -> Applicability {
        Applicability::supported(1)
    }
}

impl UiFor<String> for DualEditor {
    fn is_ui_for(_: Option<&OwnerType>, _: Option<&FieldInfo>) -> Applicability {
        Applicability::supported(1)
    }
}

fn counted(calls: &Arc<AtomicUsize>, outcome: Applicability) -> uifor::Predicate {
    let calls = Arc::clone(calls);
    Arc::new(move |_, _| {
        calls.fetch_add(1, Ordering::SeqCst);
        outcome
    })
}

fn fixed(priority: i32) -> uifor::Predicate {
    Arc::new(move |_, _| Applicability::supported(priority))
}

fn component(catalogue: &Catalogue, owner: OwnerType, field: &str, value_type: TypeKey) -> Option<TypeKey> {
    catalogue
        .resolve(&owner, field, value_type)
        .unwrap()
        .map(|r| r.component())
}

// ============================================================================
// RESOLUTION
// ============================================================================

#[test]
fn value_type_without_candidates_is_no_match() {
    let catalogue = Catalogue::new();
    catalogue.scan(&builtins::assembly()).unwrap();

    assert!(catalogue
        .resolve(&OwnerType::of::<Label>(), "Caption", TypeKey::of::<u8>())
        .unwrap()
        .is_none());
    assert!(catalogue
        .resolve(&OwnerType::of::<Unbound>(), "Anything", TypeKey::of::<Vec<u8>>())
        .unwrap()
        .is_none());
}

#[test]
fn count_fields_get_the_counter_editor() {
    let catalogue = Catalogue::new();
    catalogue
        .scan_all(&samples::assembly(), [Some(&builtins::assembly())])
        .unwrap();

    assert_eq!(
        component(&catalogue, OwnerType::of::<Order>(), "ItemCount", TypeKey::of::<i32>()),
        Some(TypeKey::of::<samples::PositiveIntegerEditor>())
    );
    assert_eq!(
        component(&catalogue, OwnerType::of::<Order>(), "Total", TypeKey::of::<i32>()),
        Some(TypeKey::of::<builtins::IntegerEditor>())
    );
}

#[test]
fn higher_priority_wins_in_either_registration_order() {
    for strong_first in [true, false] {
        let catalogue = Catalogue::new();
        let strong = (TypeKey::of::<FirstText>(), fixed(5));
        let weak = (TypeKey::of::<SecondText>(), fixed(3));

        let ordered = if strong_first {
            [strong, weak]
        } else {
            [weak, strong]
        };
        for (component, predicate) in ordered {
            catalogue.register_predicate(TypeKey::of::<String>(), component, predicate);
        }

        let found = catalogue.resolve_field::<Label, String>("Caption").unwrap().unwrap();
        assert_eq!(found.component(), TypeKey::of::<FirstText>());
    }
}

#[test]
fn equal_priorities_keep_the_first_registered() {
    let catalogue = Catalogue::new();
    let assembly = Assembly::new("text")
        .component(ComponentDescriptor::ui_for::<FirstText, String>())
        .component(ComponentDescriptor::ui_for::<SecondText, String>());
    catalogue.scan(&assembly).unwrap();

    for field in ["Caption", "Tooltip", "NotDeclared"] {
        let found = catalogue.resolve_field::<Label, String>(field).unwrap().unwrap();
        assert_eq!(found.component(), TypeKey::of::<FirstText>(), "field {field}");
    }
}

#[test]
fn separately_built_owner_handles_resolve_alike() {
    let catalogue = Catalogue::new();
    catalogue
        .scan_all(&samples::assembly(), [Some(&builtins::assembly())])
        .unwrap();

    let first = catalogue
        .resolve(&OwnerType::of::<Order>(), "ItemCount", TypeKey::of::<i32>())
        .unwrap()
        .unwrap();
    let second = catalogue.resolve_field::<Order, i32>("ItemCount").unwrap().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.component(), TypeKey::of::<samples::PositiveIntegerEditor>());
    assert_eq!(first.field().unwrap().name(), "ItemCount");
}

#[test]
fn owner_without_field_table_gives_predicates_no_metadata() {
    let catalogue = Catalogue::new();
    catalogue
        .scan_all(&samples::assembly(), [Some(&builtins::assembly())])
        .unwrap();

    let found = catalogue.resolve_field::<Unbound, i32>("ItemCount").unwrap().unwrap();
    assert!(found.field().is_none());
    assert_eq!(found.component(), TypeKey::of::<builtins::IntegerEditor>());
}

#[test]
fn undeclared_field_resolves_without_metadata() {
    let catalogue = Catalogue::new();
    catalogue.register::<FirstText, String>();

    let found = catalogue.resolve_field::<Label, String>("Missing").unwrap().unwrap();
    assert!(found.field().is_none());
    assert_eq!(found.value_type(), TypeKey::of::<String>());
}

// ============================================================================
// MEMOIZATION
// ============================================================================

#[test]
fn repeated_resolve_returns_the_same_value_and_runs_predicates_once() {
    let catalogue = Catalogue::new();
    let calls = Arc::new(AtomicUsize::new(0));
    catalogue.register_predicate(
        TypeKey::of::<String>(),
        TypeKey::of::<FirstText>(),
        counted(&calls, Applicability::supported(1)),
    );
    catalogue.register_predicate(
        TypeKey::of::<String>(),
        TypeKey::of::<SecondText>(),
        counted(&calls, Applicability::UNSUPPORTED),
    );

    let first = catalogue.resolve_field::<Label, String>("Caption").unwrap().unwrap();
    let second = catalogue.resolve_field::<Label, String>("Caption").unwrap().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(first.field().unwrap().name(), "Caption");
}

#[test]
fn no_match_is_memoized_too() {
    let catalogue = Catalogue::new();
    let calls = Arc::new(AtomicUsize::new(0));
    catalogue.register_predicate(
        TypeKey::of::<String>(),
        TypeKey::of::<FirstText>(),
        counted(&calls, Applicability::UNSUPPORTED),
    );

    for _ in 0..3 {
        assert!(catalogue.resolve_field::<Label, String>("Caption").unwrap().is_none());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(catalogue.cached_resolutions(), 1);
}

#[test]
fn same_named_fields_with_different_value_types_do_not_collide() {
    let catalogue = Catalogue::new();
    catalogue.scan(&builtins::assembly()).unwrap();

    let as_text = catalogue
        .resolve(&OwnerType::of::<Unbound>(), "Amount", TypeKey::of::<String>())
        .unwrap()
        .unwrap();
    let as_number = catalogue
        .resolve(&OwnerType::of::<Unbound>(), "Amount", TypeKey::of::<i64>())
        .unwrap()
        .unwrap();

    assert_eq!(as_text.component(), TypeKey::of::<builtins::TextEditor>());
    assert_eq!(as_number.component(), TypeKey::of::<builtins::LongEditor>());
    assert_eq!(catalogue.cached_resolutions(), 2);
}

#[test]
fn bounded_cache_stops_memoizing_but_still_resolves() {
    let catalogue = Catalogue::with_options(uifor::CatalogueOptions::bounded(1));
    catalogue.scan(&builtins::assembly()).unwrap();

    assert!(catalogue.resolve_field::<Customer, String>("Name").unwrap().is_some());
    assert!(catalogue.resolve_field::<Customer, i32>("Age").unwrap().is_some());
    assert!(catalogue.resolve_field::<Customer, i32>("Age").unwrap().is_some());
    assert_eq!(catalogue.cached_resolutions(), 1);
}

// ============================================================================
// SCANNING
// ============================================================================

#[test]
fn rescanning_fails_and_leaves_registry_unchanged() {
    let catalogue = Catalogue::new();
    let assembly = builtins::assembly();
    catalogue.scan(&assembly).unwrap();
    let before = catalogue.summary();

    let err = catalogue.scan(&assembly).unwrap_err();

    assert_eq!(
        err,
        CatalogueError::AlreadyScanned {
            assembly: builtins::ASSEMBLY_NAME.to_string()
        }
    );
    assert_eq!(catalogue.summary(), before);
}

#[test]
fn component_with_two_value_types_is_rejected() {
    let catalogue = Catalogue::new();
    let assembly = Assembly::new("dual")
        .component(ComponentDescriptor::ui_for::<DualEditor, i32>().and_ui_for::<DualEditor, String>());

    let err = catalogue.scan(&assembly).unwrap_err();

    assert_eq!(
        err,
        CatalogueError::AmbiguousCapability {
            component: "DualEditor".to_string(),
            count: 2
        }
    );
    assert!(catalogue.candidates(TypeKey::of::<i32>()).is_empty());
    assert!(catalogue.candidates(TypeKey::of::<String>()).is_empty());
    assert!(catalogue.is_scanned(assembly.id()));
    assert!(matches!(
        catalogue.scan(&assembly),
        Err(CatalogueError::AlreadyScanned { .. })
    ));
}

#[test]
fn scan_all_runs_additional_assemblies_before_primary() {
    let catalogue = Catalogue::new();
    let first = Assembly::new("first").component(ComponentDescriptor::ui_for::<FirstText, String>());
    let second = Assembly::new("second").component(ComponentDescriptor::ui_for::<SecondText, String>());

    catalogue.scan_all(&second, [None, Some(&first)]).unwrap();

    let order: Vec<TypeKey> = catalogue
        .candidates(TypeKey::of::<String>())
        .iter()
        .map(|c| c.component())
        .collect();
    assert_eq!(order, vec![TypeKey::of::<FirstText>(), TypeKey::of::<SecondText>()]);
    assert_eq!(catalogue.scanned_assemblies().len(), 2);
}

#[test]
fn catalogues_are_isolated() {
    let a = Catalogue::new();
    let b = Catalogue::new();
    a.scan(&builtins::assembly()).unwrap();

    assert!(b.value_types().is_empty());
    assert!(b.scan(&builtins::assembly()).is_ok());
}
