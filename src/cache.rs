//! Resolution cache with once-per-key computation
//!
//! Each key maps to an `Arc<OnceCell>`. The DashMap shard lock is only held
//! to fetch or insert the cell; the computation itself runs inside
//! `OnceCell::get_or_init`, which blocks concurrent callers of the same key
//! and nobody else.

use std::borrow::Borrow;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::{trace, warn};

use crate::resolver::Resolution;
use crate::types::TypeKey;

/// Cached outcome: the resolution, or `None` for "no match"
pub type Outcome = Option<Arc<Resolution>>;

/// Cache key: owner type, field name and declared value type
#[derive(Debug, Clone)]
pub struct ResolutionKey {
    owner: TypeKey,
    field: Arc<str>,
    value_type: TypeKey,
}

impl ResolutionKey {
    pub fn new(owner: TypeKey, field: &str, value_type: TypeKey) -> Self {
        Self {
            owner,
            field: Arc::from(field),
            value_type,
        }
    }

    #[inline]
    pub fn owner(&self) -> TypeKey {
        self.owner
    }

    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[inline]
    pub fn value_type(&self) -> TypeKey {
        self.value_type
    }

    #[inline]
    pub fn view(&self) -> KeyView<'_> {
        KeyView::new(self.owner, &self.field, self.value_type)
    }
}

/// Borrowed form of a [`ResolutionKey`]; cache hits never allocate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyView<'a> {
    owner: TypeKey,
    field: &'a str,
    value_type: TypeKey,
}

impl<'a> KeyView<'a> {
    pub fn new(owner: TypeKey, field: &'a str, value_type: TypeKey) -> Self {
        Self {
            owner,
            field,
            value_type,
        }
    }

    #[inline]
    pub fn owner(&self) -> TypeKey {
        self.owner
    }

    #[inline]
    pub fn field(&self) -> &'a str {
        self.field
    }

    #[inline]
    pub fn value_type(&self) -> TypeKey {
        self.value_type
    }

    pub fn to_key(&self) -> ResolutionKey {
        ResolutionKey::new(self.owner, self.field, self.value_type)
    }
}

/// Anything that reads as a [`KeyView`]. Stored keys borrow as
/// `dyn AsKeyView` so the map can be probed without building a key.
pub trait AsKeyView {
    fn key_view(&self) -> KeyView<'_>;
}

impl AsKeyView for ResolutionKey {
    fn key_view(&self) -> KeyView<'_> {
        self.view()
    }
}

impl AsKeyView for KeyView<'_> {
    fn key_view(&self) -> KeyView<'_> {
        *self
    }
}

impl<'a> Borrow<dyn AsKeyView + 'a> for ResolutionKey {
    fn borrow(&self) -> &(dyn AsKeyView + 'a) {
        self
    }
}

// Hash and Eq of the owned key, the view and the trait object must agree
impl Hash for dyn AsKeyView + '_ {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_view().hash(state);
    }
}

impl PartialEq for dyn AsKeyView + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.key_view() == other.key_view()
    }
}

impl Eq for dyn AsKeyView + '_ {}

impl Hash for ResolutionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.view().hash(state);
    }
}

impl PartialEq for ResolutionKey {
    fn eq(&self, other: &Self) -> bool {
        self.view() == other.view()
    }
}

impl Eq for ResolutionKey {}

/// Memoized outcomes per [`ResolutionKey`]
pub struct ResolutionCache {
    entries: DashMap<ResolutionKey, Arc<OnceCell<Outcome>>>,
    capacity: Option<usize>,
    overflow_reported: AtomicBool,
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ResolutionCache {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: DashMap::new(),
            capacity,
            overflow_reported: AtomicBool::new(false),
        }
    }

    /// Return the cached outcome for `key`, computing it at most once.
    ///
    /// Concurrent callers racing on a missing key all receive the outcome
    /// of the single computation that won. The owned key is only built
    /// when a new entry is inserted.
    pub fn get_or_compute<F>(&self, key: KeyView<'_>, compute: F) -> Outcome
    where
        F: FnOnce(KeyView<'_>) -> Outcome,
    {
        let existing = self
            .entries
            .get(&key as &dyn AsKeyView)
            .map(|cell| Arc::clone(cell.value()));
        if let Some(cell) = existing {
            if let Some(outcome) = cell.get() {
                trace!(owner = %key.owner, field = key.field, "Resolution cache hit");
                return outcome.clone();
            }
            return cell.get_or_init(|| compute(key)).clone();
        }

        if self.is_full() {
            if !self.overflow_reported.swap(true, Ordering::Relaxed) {
                warn!(
                    capacity = ?self.capacity,
                    "Resolution cache is full; further resolutions are not memoized"
                );
            }
            return compute(key);
        }

        trace!(owner = %key.owner, field = key.field, "Resolution cache miss");
        let cell = Arc::clone(
            self.entries
                .entry(key.to_key())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .value(),
        );
        cell.get_or_init(|| compute(key)).clone()
    }

    /// Cached outcome without computing; `None` when not cached yet
    pub fn peek(&self, key: &ResolutionKey) -> Option<Outcome> {
        self.entries.get(key).and_then(|cell| cell.get().cloned())
    }

    fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.entries.len() >= capacity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
