//! The contract a UI component implements to take part in resolution
//!
//! A component declares, per value type it renders, an associated
//! applicability function ([`UiFor::is_ui_for`]). The host renderer then
//! wires four bindable members on the component instance, grouped in
//! [`BoundValue`] and exposed through [`Bindable`].

use std::fmt;
use std::sync::Arc;

use crate::field::{FieldInfo, OwnerType};
use crate::types::Applicability;

/// Type-erased applicability predicate as stored in the registry
pub type Predicate =
    Arc<dyn Fn(Option<&OwnerType>, Option<&FieldInfo>) -> Applicability + Send + Sync>;

/// Capability of rendering fields whose value type is `V`.
///
/// Generic over `V` so that a component type can (mistakenly) implement it
/// several times; the scanner rejects such components.
pub trait UiFor<V: 'static>: 'static {
    /// Whether this component supports `field` on `owner`, and how strongly.
    /// Must be pure: the catalogue calls it at most once per cached key.
    fn is_ui_for(owner: Option<&OwnerType>, field: Option<&FieldInfo>) -> Applicability;
}

/// Wrap `C`'s `UiFor<V>` implementation as a registry predicate
pub fn predicate_of<C: UiFor<V>, V: 'static>() -> Predicate {
    Arc::new(|owner, field| C::is_ui_for(owner, field))
}

/// Callback raised when a bound component edits its value
pub struct ValueChanged<V> {
    callback: Arc<dyn Fn(V) + Send + Sync>,
}

impl<V> ValueChanged<V> {
    pub fn new(callback: impl Fn(V) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
        }
    }

    pub fn invoke(&self, value: V) {
        (self.callback)(value)
    }
}

impl<V> Clone for ValueChanged<V> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<V> fmt::Debug for ValueChanged<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueChanged(..)")
    }
}

/// Expression pointing at `owner.field`, with an accessor for its current
/// value.
///
/// Two expressions are equal when they point at the same owner type and
/// field name; the accessor does not take part in equality.
pub struct FieldExpression<V> {
    owner: OwnerType,
    field: Arc<str>,
    getter: Arc<dyn Fn() -> V + Send + Sync>,
}

impl<V> FieldExpression<V> {
    pub fn new(
        owner: OwnerType,
        field: &str,
        getter: impl Fn() -> V + Send + Sync + 'static,
    ) -> Self {
        Self {
            owner,
            field: Arc::from(field),
            getter: Arc::new(getter),
        }
    }

    #[inline]
    pub fn owner(&self) -> &OwnerType {
        &self.owner
    }

    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Evaluate the accessor
    pub fn get(&self) -> V {
        (self.getter)()
    }
}

impl<V> Clone for FieldExpression<V> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner,
            field: Arc::clone(&self.field),
            getter: Arc::clone(&self.getter),
        }
    }
}

impl<V> PartialEq for FieldExpression<V> {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.field == other.field
    }
}

impl<V> fmt::Debug for FieldExpression<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldExpression({}.{})", self.owner.name(), self.field)
    }
}

/// The four members the renderer sets on a resolved component
#[derive(Debug, Clone)]
pub struct BoundValue<V> {
    pub value: V,
    pub value_changed: Option<ValueChanged<V>>,
    pub value_expression: Option<FieldExpression<V>>,
    pub value_field: Option<FieldInfo>,
}

impl<V: Default> Default for BoundValue<V> {
    fn default() -> Self {
        Self {
            value: V::default(),
            value_changed: None,
            value_expression: None,
            value_field: None,
        }
    }
}

impl<V> BoundValue<V> {
    /// Push an edited value: store it and raise `value_changed`
    pub fn edit(&mut self, value: V)
    where
        V: Clone,
    {
        self.value = value.clone();
        if let Some(callback) = &self.value_changed {
            callback.invoke(value);
        }
    }
}

/// Instance-side contract of a component rendering values of type `V`
pub trait Bindable<V: 'static> {
    fn bound(&self) -> &BoundValue<V>;
    fn bound_mut(&mut self) -> &mut BoundValue<V>;

    fn value(&self) -> &V {
        &self.bound().value
    }

    fn value_field(&self) -> Option<&FieldInfo> {
        self.bound().value_field.as_ref()
    }

    /// Take over every member the renderer produced
    fn bind(&mut self, bound: BoundValue<V>) {
        *self.bound_mut() = bound;
    }
}
