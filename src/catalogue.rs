//! The UI catalogue: scan phase, then resolve phase
//!
//! A [`Catalogue`] owns the candidate registry, the set of scanned
//! assemblies and the resolution cache. Construct one per host (or use
//! [`Catalogue::global`]), scan the component assemblies at startup, then
//! resolve fields from any thread.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::assembly::{Assembly, AssemblyId};
use crate::cache::{KeyView, ResolutionCache};
use crate::component::{predicate_of, Predicate, UiFor};
use crate::config::CatalogueOptions;
use crate::error::CatalogueError;
use crate::field::{Model, OwnerType};
use crate::registry::{CandidateEntry, CandidateRegistry};
use crate::resolver::{find_most_applicable, Resolution};
use crate::scanner::Scanner;
use crate::types::TypeKey;

/// Process-wide catalogue for hosts that want a single shared instance
static GLOBAL: Lazy<Catalogue> = Lazy::new(Catalogue::new);

/// Registry of UI components and the cache of their resolutions
pub struct Catalogue {
    registry: CandidateRegistry,
    scanner: Scanner,
    cache: ResolutionCache,
    options: CatalogueOptions,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalogue {
    pub fn new() -> Self {
        Self::with_options(CatalogueOptions::default())
    }

    pub fn with_options(options: CatalogueOptions) -> Self {
        Self {
            registry: CandidateRegistry::new(),
            scanner: Scanner::new(),
            cache: ResolutionCache::new(options.max_cached_resolutions),
            options,
        }
    }

    /// The shared process-wide catalogue (default options)
    pub fn global() -> &'static Catalogue {
        &GLOBAL
    }

    pub fn options(&self) -> &CatalogueOptions {
        &self.options
    }

    // ─────────────────────────────────────────────────────────────
    // Scan phase
    // ─────────────────────────────────────────────────────────────

    /// Scan one assembly. Fails if it was scanned before.
    pub fn scan(&self, assembly: &Assembly) -> Result<(), CatalogueError> {
        if !self.cache.is_empty() {
            warn!(
                assembly = %assembly.id(),
                cached = self.cache.len(),
                "Scanning after resolutions were cached; cached outcomes will not see new components"
            );
        }
        self.scanner.scan(assembly, &self.registry)
    }

    /// Scan `primary` plus `additional` assemblies. `None` entries are
    /// skipped; additional assemblies are scanned first, `primary` last.
    /// Repeats within the call are collapsed unless the options say otherwise.
    pub fn scan_all<'a, I>(&self, primary: &'a Assembly, additional: I) -> Result<(), CatalogueError>
    where
        I: IntoIterator<Item = Option<&'a Assembly>>,
    {
        let mut queue: Vec<&Assembly> = additional.into_iter().flatten().collect();
        queue.push(primary);

        if self.options.deduplicate_scan_inputs {
            let mut seen: HashSet<&AssemblyId> = HashSet::with_capacity(queue.len());
            queue.retain(|&assembly| seen.insert(assembly.id()));
        }

        for assembly in queue {
            self.scan(assembly)?;
        }
        Ok(())
    }

    /// Register `C` for value type `V` directly, outside any assembly
    pub fn register<C: UiFor<V>, V: 'static>(&self) {
        self.registry
            .register(TypeKey::of::<V>(), TypeKey::of::<C>(), predicate_of::<C, V>());
    }

    /// Register a raw predicate for `component` under `value_type`
    pub fn register_predicate(&self, value_type: TypeKey, component: TypeKey, predicate: Predicate) {
        self.registry.register(value_type, component, predicate);
    }

    // ─────────────────────────────────────────────────────────────
    // Resolve phase
    // ─────────────────────────────────────────────────────────────

    /// Most applicable component for `owner.field_name` of type `value_type`.
    ///
    /// `Ok(None)` means no component supports the field. Outcomes are
    /// computed once per key and shared by every caller.
    #[instrument(skip(self, owner), fields(owner = owner.name(), value_type = %value_type))]
    pub fn resolve(
        &self,
        owner: &OwnerType,
        field_name: &str,
        value_type: TypeKey,
    ) -> Result<Option<Arc<Resolution>>, CatalogueError> {
        if field_name.is_empty() {
            return Err(CatalogueError::EmptyFieldName {
                owner: owner.name().to_string(),
            });
        }

        let key = KeyView::new(owner.key(), field_name, value_type);
        Ok(self.cache.get_or_compute(key, |key| {
            find_most_applicable(&self.registry, owner, key.field(), key.value_type()).map(Arc::new)
        }))
    }

    /// [`resolve`](Self::resolve) with owner and value type taken from
    /// type parameters
    pub fn resolve_field<O: Model, V: 'static>(
        &self,
        field_name: &str,
    ) -> Result<Option<Arc<Resolution>>, CatalogueError> {
        self.resolve(&OwnerType::of::<O>(), field_name, TypeKey::of::<V>())
    }

    // ─────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────

    /// Candidates for `value_type`, in registration order
    pub fn candidates(&self, value_type: TypeKey) -> Arc<[CandidateEntry]> {
        self.registry.lookup(value_type)
    }

    pub fn value_types(&self) -> Vec<TypeKey> {
        self.registry.value_types()
    }

    pub fn is_scanned(&self, id: &AssemblyId) -> bool {
        self.scanner.is_scanned(id)
    }

    pub fn scanned_assemblies(&self) -> Vec<AssemblyId> {
        self.scanner.scanned()
    }

    /// Number of memoized resolutions (matches and no-matches)
    pub fn cached_resolutions(&self) -> usize {
        self.cache.len()
    }

    /// Serializable snapshot of registry contents, sorted by value type
    pub fn summary(&self) -> CatalogueSummary {
        let mut value_types = self.registry.value_types();
        // Short names can repeat across modules; the full path keeps them apart
        value_types.sort_by_key(|value_type| (value_type.short_name(), value_type.name()));

        CatalogueSummary {
            value_types: value_types
                .into_iter()
                .map(|value_type| ValueTypeSummary {
                    value_type: value_type.short_name().to_string(),
                    type_name: value_type.name().to_string(),
                    candidates: self
                        .registry
                        .lookup(value_type)
                        .iter()
                        .map(|c| c.component().short_name().to_string())
                        .collect(),
                })
                .collect(),
            scanned_assemblies: self
                .scanned_assemblies()
                .iter()
                .map(ToString::to_string)
                .collect(),
            cached_resolutions: self.cached_resolutions(),
        }
    }
}

/// Candidates registered for one value type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueTypeSummary {
    pub value_type: String,
    /// Full path, distinguishes value types sharing a short name
    pub type_name: String,
    pub candidates: Vec<String>,
}

/// Snapshot of a catalogue for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogueSummary {
    pub value_types: Vec<ValueTypeSummary>,
    pub scanned_assemblies: Vec<String>,
    pub cached_resolutions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::ComponentDescriptor;
    use crate::field::FieldInfo;
    use crate::types::Applicability;

    struct Order;

    impl Model for Order {
        fn fields() -> Vec<FieldInfo> {
            vec![FieldInfo::public::<Order, i32>("Total")]
        }
    }

    struct NumberBox;

    impl UiFor<i32> for NumberBox {
        fn is_ui_for(_: Option<&OwnerType>, _: Option<&FieldInfo>) -> Applicability {
            Applicability::supported(1)
        }
    }

    fn numbers() -> Assembly {
        Assembly::new("numbers").component(ComponentDescriptor::ui_for::<NumberBox, i32>())
    }

    #[test]
    fn empty_field_name_is_invalid() {
        let catalogue = Catalogue::new();
        let err = catalogue.resolve_field::<Order, i32>("").unwrap_err();
        assert_eq!(
            err,
            CatalogueError::EmptyFieldName {
                owner: "Order".to_string()
            }
        );
        assert_eq!(catalogue.cached_resolutions(), 0);
    }

    #[test]
    fn scan_all_skips_none_and_collapses_repeats() {
        let catalogue = Catalogue::new();
        let primary = numbers();

        catalogue
            .scan_all(&primary, [None, Some(&primary), None])
            .unwrap();

        assert!(catalogue.is_scanned(primary.id()));
        assert_eq!(catalogue.candidates(TypeKey::of::<i32>()).len(), 1);
    }

    #[test]
    fn strict_scan_all_rejects_repeats() {
        let catalogue = Catalogue::with_options(CatalogueOptions::strict());
        let primary = numbers();

        let err = catalogue.scan_all(&primary, [Some(&primary)]).unwrap_err();
        assert!(matches!(err, CatalogueError::AlreadyScanned { .. }));
        assert_eq!(catalogue.candidates(TypeKey::of::<i32>()).len(), 1);
    }

    #[test]
    fn direct_registration_resolves() {
        let catalogue = Catalogue::new();
        catalogue.register::<NumberBox, i32>();

        let found = catalogue.resolve_field::<Order, i32>("Total").unwrap().unwrap();
        assert_eq!(found.component(), TypeKey::of::<NumberBox>());
        assert_eq!(catalogue.cached_resolutions(), 1);
    }

    #[test]
    fn summary_lists_candidates_and_assemblies() {
        let catalogue = Catalogue::new();
        catalogue.scan(&numbers()).unwrap();

        let summary = catalogue.summary();
        assert_eq!(
            summary.value_types,
            vec![ValueTypeSummary {
                value_type: "i32".to_string(),
                type_name: "i32".to_string(),
                candidates: vec!["NumberBox".to_string()],
            }]
        );
        assert_eq!(summary.scanned_assemblies, vec!["numbers".to_string()]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["cached_resolutions"], 0);
    }

    mod billing {
        pub struct Status;
    }

    mod shipping {
        pub struct Status;
    }

    struct StatusPicker;

    #[test]
    fn summary_keeps_value_types_that_share_a_short_name() {
        let catalogue = Catalogue::new();
        let picker = TypeKey::of::<StatusPicker>();
        let always: Predicate = Arc::new(|_, _| Applicability::supported(1));
        catalogue.register_predicate(TypeKey::of::<billing::Status>(), picker, Arc::clone(&always));
        catalogue.register_predicate(TypeKey::of::<shipping::Status>(), picker, always);

        let summary = catalogue.summary();

        assert_eq!(catalogue.value_types().len(), 2);
        assert_eq!(summary.value_types.len(), 2);
        assert!(summary.value_types.iter().all(|entry| entry.value_type == "Status"));
        assert!(summary.value_types[0].type_name.ends_with("billing::Status"));
        assert!(summary.value_types[1].type_name.ends_with("shipping::Status"));
    }
}
