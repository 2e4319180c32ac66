//! uifor - pick the UI component that renders a bound field
//!
//! Components declare, per value type, how applicable they are to a field
//! ([`UiFor`]). Assemblies of components are scanned once into a
//! [`Catalogue`]; the catalogue then resolves `(owner, field, value type)`
//! to the single most applicable component and memoizes the outcome.

pub mod assembly;
pub mod binding;
pub mod builtins;
pub mod cache;
pub mod catalogue;
pub mod component;
pub mod config;
pub mod error;
pub mod field;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod types;

pub use assembly::{Assembly, AssemblyId, ComponentDescriptor};
pub use binding::{BindingParameters, FieldBinding, RenderedComponent};
pub use catalogue::{Catalogue, CatalogueSummary, ValueTypeSummary};
pub use component::{Bindable, BoundValue, FieldExpression, Predicate, UiFor, ValueChanged};
pub use config::CatalogueOptions;
pub use error::{CatalogueError, FixSuggestion};
pub use field::{FieldInfo, Model, OwnerType, Visibility};
pub use registry::{CandidateEntry, CandidateRegistry};
pub use resolver::Resolution;
pub use types::{Applicability, TypeKey};
