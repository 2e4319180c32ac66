//! Field metadata for bindable owner types
//!
//! Rust has no runtime reflection, so an owner type describes its fields
//! through the [`Model`] trait. [`OwnerType`] captures that table together
//! with the owner's [`TypeKey`] and is what predicates receive.

use std::fmt;
use std::sync::Arc;

use crate::types::TypeKey;

/// Whether the field is part of the owner's public surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

/// Description of one named field on an owner type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    owner: TypeKey,
    name: Arc<str>,
    value_type: TypeKey,
    visibility: Visibility,
}

impl FieldInfo {
    pub fn new(owner: TypeKey, name: &str, value_type: TypeKey, visibility: Visibility) -> Self {
        Self {
            owner,
            name: Arc::from(name),
            value_type,
            visibility,
        }
    }

    /// Public field `name: V` declared on `Owner`
    pub fn public<Owner: 'static, V: 'static>(name: &str) -> Self {
        Self::new(
            TypeKey::of::<Owner>(),
            name,
            TypeKey::of::<V>(),
            Visibility::Public,
        )
    }

    /// Non-public field `name: V` declared on `Owner`
    pub fn private<Owner: 'static, V: 'static>(name: &str) -> Self {
        Self::new(
            TypeKey::of::<Owner>(),
            name,
            TypeKey::of::<V>(),
            Visibility::Private,
        )
    }

    #[inline]
    pub fn owner(&self) -> TypeKey {
        self.owner
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value_type(&self) -> TypeKey {
        self.value_type
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

impl fmt::Display for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.owner, self.name, self.value_type)
    }
}

/// A type whose fields can be bound to UI components.
///
/// The field table belongs to the type: every [`OwnerType`] for `T` reads
/// `T::fields`. Types without bindable fields keep the empty default.
///
/// ```
/// use uifor::{FieldInfo, Model};
///
/// struct Order {
///     item_count: i32,
/// }
///
/// impl Model for Order {
///     fn fields() -> Vec<FieldInfo> {
///         vec![FieldInfo::public::<Order, i32>("ItemCount")]
///     }
/// }
/// ```
pub trait Model: 'static {
    fn fields() -> Vec<FieldInfo> {
        Vec::new()
    }
}

/// Runtime handle on an owner type and its field table
#[derive(Clone, Copy)]
pub struct OwnerType {
    key: TypeKey,
    fields: fn() -> Vec<FieldInfo>,
}

impl OwnerType {
    /// Owner described by its [`Model`] impl
    pub fn of<T: Model>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            fields: T::fields,
        }
    }

    #[inline]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Short name of the owner type
    #[inline]
    pub fn name(&self) -> &'static str {
        self.key.short_name()
    }

    pub fn fields(&self) -> Vec<FieldInfo> {
        (self.fields)()
    }

    /// Look a field up by exact name, public and private alike
    pub fn field(&self, name: &str) -> Option<FieldInfo> {
        (self.fields)().into_iter().find(|f| f.name() == name)
    }
}

impl PartialEq for OwnerType {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for OwnerType {}

impl fmt::Debug for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnerType").field(&self.key).finish()
    }
}
