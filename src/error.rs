//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Every failure the catalogue and the binding layer can report.
///
/// All of these are programming or configuration mistakes. A resolution that
/// finds no component is not an error at the catalogue level; it becomes
/// [`CatalogueError::NoComponent`] only once a binding insists on a match.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    // ─────────────────────────────────────────────────────────────
    // Invalid arguments (UIFOR-001 to UIFOR-002)
    // ─────────────────────────────────────────────────────────────
    #[error("UIFOR-001: Field name must not be empty (owner '{owner}')")]
    EmptyFieldName { owner: String },

    #[error("UIFOR-002: Assembly name must not be empty")]
    EmptyAssemblyName,

    // ─────────────────────────────────────────────────────────────
    // Scan errors (UIFOR-010 to UIFOR-011)
    // ─────────────────────────────────────────────────────────────
    #[error("UIFOR-010: Assembly '{assembly}' has already been scanned")]
    AlreadyScanned { assembly: String },

    #[error(
        "UIFOR-011: Component '{component}' should only implement one UiFor<T> but {count} implementations were found"
    )]
    AmbiguousCapability { component: String, count: usize },

    // ─────────────────────────────────────────────────────────────
    // Binding errors (UIFOR-020 to UIFOR-023)
    // ─────────────────────────────────────────────────────────────
    #[error("UIFOR-020: Use either the one-way binding or the two-way binding, not both")]
    BothBindingModes,

    #[error(
        "UIFOR-021: Two-way binding needs its value, change callback and expression set together"
    )]
    IncompleteTwoWay,

    #[error("UIFOR-022: No binding given: set the one-way expression or bind two-way")]
    MissingBinding,

    #[error("UIFOR-023: No UiFor<T> registered that matches '{owner}.{field}'")]
    NoComponent { owner: String, field: String },

    // ─────────────────────────────────────────────────────────────
    // Lookup and output errors (UIFOR-030 to UIFOR-032)
    // ─────────────────────────────────────────────────────────────
    #[error("UIFOR-030: Unknown owner type '{owner}'")]
    UnknownOwner { owner: String },

    #[error("UIFOR-031: Owner '{owner}' declares no field '{field}'")]
    UnknownField { owner: String, field: String },

    #[error("UIFOR-032: Failed to serialize catalogue summary: {details}")]
    InvalidJson { details: String },
}

impl FixSuggestion for CatalogueError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            CatalogueError::EmptyFieldName { .. } => {
                Some("Pass the name of a field declared by the owner's Model impl")
            }
            CatalogueError::EmptyAssemblyName => Some("Give the assembly a unique, non-empty name"),
            CatalogueError::AlreadyScanned { .. } => {
                Some("Scan each assembly once at startup, before resolving any field")
            }
            CatalogueError::AmbiguousCapability { .. } => {
                Some("Split the component into one type per value type it renders")
            }
            CatalogueError::BothBindingModes => {
                Some("Remove either the one-way expression or the two-way parameters")
            }
            CatalogueError::IncompleteTwoWay => {
                Some("Bind two-way through BindingParameters::two_way, not field by field")
            }
            CatalogueError::MissingBinding => {
                Some("Use BindingParameters::one_way or BindingParameters::two_way")
            }
            CatalogueError::NoComponent { .. } => {
                Some("Register a component whose UiFor<T> accepts this field, then scan its assembly")
            }
            CatalogueError::UnknownOwner { .. } => {
                Some("Use the short name of a type with a Model impl (names are case-sensitive)")
            }
            CatalogueError::UnknownField { .. } => {
                Some("Check the field name against the owner's Model::fields table")
            }
            CatalogueError::InvalidJson { .. } => {
                Some("Use --format text, and report the value type that failed to serialize")
            }
        }
    }
}
