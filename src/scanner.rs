//! One-time assembly scanning into the candidate registry

use std::sync::Arc;

use dashmap::DashSet;
use tracing::{debug, info, instrument, trace};

use crate::assembly::{Assembly, AssemblyId, ComponentDescriptor};
use crate::error::CatalogueError;
use crate::registry::CandidateRegistry;

/// Tracks scanned assemblies and feeds their components to the registry
#[derive(Default)]
pub struct Scanner {
    scanned: DashSet<AssemblyId>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every eligible component of `assembly`.
    ///
    /// The assembly is marked scanned before its components are walked, so a
    /// scan aborted by an ambiguous component cannot be retried.
    #[instrument(skip_all, fields(assembly = %assembly.id()))]
    pub fn scan(
        &self,
        assembly: &Assembly,
        registry: &CandidateRegistry,
    ) -> Result<(), CatalogueError> {
        if assembly.id().as_str().is_empty() {
            return Err(CatalogueError::EmptyAssemblyName);
        }

        if !self.scanned.insert(assembly.id().clone()) {
            return Err(CatalogueError::AlreadyScanned {
                assembly: assembly.id().to_string(),
            });
        }

        let mut registered = 0;
        for descriptor in assembly.components() {
            if scan_component(descriptor, registry)? {
                registered += 1;
            }
        }

        info!(
            components = assembly.components().len(),
            registered, "Scanned assembly"
        );
        Ok(())
    }

    pub fn is_scanned(&self, id: &AssemblyId) -> bool {
        self.scanned.contains(id)
    }

    /// Scanned assembly ids, sorted by name
    pub fn scanned(&self) -> Vec<AssemblyId> {
        let mut ids: Vec<AssemblyId> = self.scanned.iter().map(|id| id.key().clone()).collect();
        ids.sort();
        ids
    }
}

/// Register one component; `Ok(false)` when it is skipped
fn scan_component(
    descriptor: &ComponentDescriptor,
    registry: &CandidateRegistry,
) -> Result<bool, CatalogueError> {
    let component = descriptor.component();

    if !descriptor.is_exported() || !descriptor.is_concrete() {
        trace!(component = %component, "Skipping internal or abstract component");
        return Ok(false);
    }

    match descriptor.capabilities() {
        [] => {
            trace!(component = %component, "Skipping type without UiFor capability");
            Ok(false)
        }
        [capability] => {
            registry.register(
                capability.value_type(),
                component,
                Arc::clone(capability.predicate()),
            );
            Ok(true)
        }
        many => {
            debug!(component = %component, count = many.len(), "Ambiguous UiFor capability");
            Err(CatalogueError::AmbiguousCapability {
                component: component.short_name().to_string(),
                count: many.len(),
            })
        }
    }
}
