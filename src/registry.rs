//! Candidate registry: value type → components that claim to render it
//!
//! Lists are append-only and kept in registration order, which the resolver
//! relies on to break priority ties. Each list is an immutable `Arc<[_]>`
//! replaced atomically on append, so readers take a snapshot and never hold
//! a shard lock while evaluating predicates.

use std::fmt;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::component::Predicate;
use crate::field::{FieldInfo, OwnerType};
use crate::types::{Applicability, TypeKey};

/// A component registered under a value type, with its predicate
#[derive(Clone)]
pub struct CandidateEntry {
    component: TypeKey,
    predicate: Predicate,
}

impl CandidateEntry {
    #[inline]
    pub fn component(&self) -> TypeKey {
        self.component
    }

    /// Run the component's applicability predicate
    #[inline]
    pub fn evaluate(&self, owner: Option<&OwnerType>, field: Option<&FieldInfo>) -> Applicability {
        (self.predicate)(owner, field)
    }
}

impl fmt::Debug for CandidateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateEntry")
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}

/// Thread-safe map of value type to ordered candidates (lock-free reads)
#[derive(Default)]
pub struct CandidateRegistry {
    by_value_type: DashMap<TypeKey, Arc<[CandidateEntry]>>,
}

impl CandidateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `component` to the candidates for `value_type`
    pub fn register(&self, value_type: TypeKey, component: TypeKey, predicate: Predicate) {
        let entry = CandidateEntry {
            component,
            predicate,
        };

        // Entry API holds the shard lock, so concurrent appends to the same
        // value type never lose an entry.
        let position = match self.by_value_type.entry(value_type) {
            Entry::Occupied(mut e) => {
                let mut list = e.get().to_vec();
                list.push(entry);
                let position = list.len();
                e.insert(list.into());
                position
            }
            Entry::Vacant(e) => {
                e.insert(Arc::from(vec![entry]));
                1
            }
        };

        debug!(
            value_type = %value_type,
            component = %component,
            position,
            "Registered UI candidate"
        );
    }

    /// Snapshot of the candidates for `value_type`, in registration order
    pub fn lookup(&self, value_type: TypeKey) -> Arc<[CandidateEntry]> {
        self.by_value_type
            .get(&value_type)
            .map(|list| Arc::clone(list.value()))
            .unwrap_or_else(|| Vec::new().into())
    }

    pub fn contains(&self, value_type: TypeKey) -> bool {
        self.by_value_type.contains_key(&value_type)
    }

    /// Every value type with at least one candidate (unordered)
    pub fn value_types(&self) -> Vec<TypeKey> {
        self.by_value_type.iter().map(|e| *e.key()).collect()
    }

    /// Total number of candidate entries across all value types
    pub fn len(&self) -> usize {
        self.by_value_type.iter().map(|e| e.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_value_type.is_empty()
    }
}
