//! Core identity types shared by the registry, the resolver and the cache
//!
//! - [`TypeKey`]: identity of a Rust type (owner, value or component)
//! - [`Applicability`]: what a component's predicate answers for a field

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

/// Identity of a `'static` Rust type.
///
/// Equality and hashing only look at the [`TypeId`]; the name is carried
/// for logs, error messages and listings.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for `T`
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name (`alloc::string::String`)
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path (`String`, `Option<i32>` stays
    /// `Option<i32>` with only the outer path stripped)
    pub fn short_name(&self) -> &'static str {
        let name = self.name;
        let head_end = name.find('<').unwrap_or(name.len());
        let start = name[..head_end].rfind("::").map(|i| i + 2).unwrap_or(0);
        &name[start..]
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl Serialize for TypeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.short_name())
    }
}

/// Answer of an applicability predicate: whether a component can render a
/// field and, if so, how strongly it wants to.
///
/// The priority of an unsupported outcome is always 0 and never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Applicability {
    supported: bool,
    priority: i32,
}

impl Applicability {
    pub const UNSUPPORTED: Applicability = Applicability {
        supported: false,
        priority: 0,
    };

    /// Supported with the given priority (higher wins)
    pub const fn supported(priority: i32) -> Self {
        Self {
            supported: true,
            priority,
        }
    }

    /// `supported(priority)` when `condition` holds, otherwise unsupported
    pub const fn when(condition: bool, priority: i32) -> Self {
        if condition {
            Self::supported(priority)
        } else {
            Self::UNSUPPORTED
        }
    }

    #[inline]
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Priority, only for supported outcomes
    #[inline]
    pub fn priority(&self) -> Option<i32> {
        self.supported.then_some(self.priority)
    }
}
