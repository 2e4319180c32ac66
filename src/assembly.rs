//! Explicit registration units
//!
//! An [`Assembly`] is a named bundle of [`ComponentDescriptor`]s, the
//! compile-time stand-in for a library of components that a host hands to
//! the catalogue at startup. Each descriptor lists the `UiFor<V>`
//! implementations its component provides.

use std::fmt;
use std::sync::Arc;

use crate::component::{predicate_of, Predicate, UiFor};
use crate::types::TypeKey;

/// Identity of an assembly; two assemblies with the same name are the same
/// assembly as far as scanning is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssemblyId(Arc<str>);

impl AssemblyId {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssemblyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `UiFor<V>` implementation: the value type plus its predicate
#[derive(Clone)]
pub struct Capability {
    value_type: TypeKey,
    predicate: Predicate,
}

impl Capability {
    pub fn new(value_type: TypeKey, predicate: Predicate) -> Self {
        Self {
            value_type,
            predicate,
        }
    }

    #[inline]
    pub fn value_type(&self) -> TypeKey {
        self.value_type
    }

    #[inline]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("value_type", &self.value_type)
            .finish_non_exhaustive()
    }
}

/// A component type and the capabilities it declares
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    component: TypeKey,
    capabilities: Vec<Capability>,
    exported: bool,
    concrete: bool,
}

impl ComponentDescriptor {
    /// Descriptor for `C` with no capability yet
    pub fn new<C: ?Sized + 'static>() -> Self {
        Self::for_type(TypeKey::of::<C>())
    }

    pub fn for_type(component: TypeKey) -> Self {
        Self {
            component,
            capabilities: Vec::new(),
            exported: true,
            concrete: true,
        }
    }

    /// Descriptor for `C` rendering values of type `V`
    pub fn ui_for<C: UiFor<V>, V: 'static>() -> Self {
        Self::new::<C>().and_ui_for::<C, V>()
    }

    /// Declare that `C` also implements `UiFor<V>`
    pub fn and_ui_for<C: UiFor<V>, V: 'static>(self) -> Self {
        debug_assert_eq!(
            TypeKey::of::<C>(),
            self.component,
            "capability added to a descriptor of another component"
        );
        self.capability(TypeKey::of::<V>(), predicate_of::<C, V>())
    }

    /// Declare a capability from a raw predicate
    pub fn capability(mut self, value_type: TypeKey, predicate: Predicate) -> Self {
        self.capabilities.push(Capability::new(value_type, predicate));
        self
    }

    /// Not exported from its assembly; scanning skips it
    pub fn internal(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Abstract base component; scanning skips it
    pub fn abstract_type(mut self) -> Self {
        self.concrete = false;
        self
    }

    #[inline]
    pub fn component(&self) -> TypeKey {
        self.component
    }

    #[inline]
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    #[inline]
    pub fn is_exported(&self) -> bool {
        self.exported
    }

    #[inline]
    pub fn is_concrete(&self) -> bool {
        self.concrete
    }
}

/// Named, ordered set of component descriptors
#[derive(Debug, Clone)]
pub struct Assembly {
    id: AssemblyId,
    components: Vec<ComponentDescriptor>,
}

impl Assembly {
    pub fn new(name: &str) -> Self {
        Self {
            id: AssemblyId::new(name),
            components: Vec::new(),
        }
    }

    /// Add a component (scanned in insertion order)
    pub fn component(mut self, descriptor: ComponentDescriptor) -> Self {
        self.components.push(descriptor);
        self
    }

    #[inline]
    pub fn id(&self) -> &AssemblyId {
        &self.id
    }

    #[inline]
    pub fn components(&self) -> &[ComponentDescriptor] {
        &self.components
    }
}
