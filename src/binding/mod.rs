//! Field binding: the rendering-side consumer of the catalogue
//!
//! A [`FieldBinding`] is what a host renderer keeps per bound field. On every
//! parameter update it validates the binding, checks whether the bound
//! expression changed since the previous cycle and only then asks the
//! catalogue again. The resolved component and field metadata are cached on
//! the binding for rendering.

mod validate;

pub use validate::validate_parameters;

use std::sync::Arc;

use tracing::debug;

use crate::catalogue::Catalogue;
use crate::component::{BoundValue, FieldExpression, ValueChanged};
use crate::error::CatalogueError;
use crate::field::FieldInfo;
use crate::resolver::Resolution;
use crate::types::TypeKey;

/// Parameters a host passes to a field binding on each update
pub struct BindingParameters<V> {
    pub one_way: Option<FieldExpression<V>>,
    pub two_way: Option<V>,
    pub two_way_changed: Option<ValueChanged<V>>,
    pub two_way_expression: Option<FieldExpression<V>>,
}

impl<V> Default for BindingParameters<V> {
    fn default() -> Self {
        Self {
            one_way: None,
            two_way: None,
            two_way_changed: None,
            two_way_expression: None,
        }
    }
}

impl<V> BindingParameters<V> {
    /// Read-only binding to `expression`
    pub fn one_way(expression: FieldExpression<V>) -> Self {
        Self {
            one_way: Some(expression),
            ..Self::default()
        }
    }

    /// Two-way binding: current value, change callback, and the expression
    /// naming the bound field
    pub fn two_way(value: V, changed: ValueChanged<V>, expression: FieldExpression<V>) -> Self {
        Self {
            two_way: Some(value),
            two_way_changed: Some(changed),
            two_way_expression: Some(expression),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CatalogueError> {
        validate_parameters(self)
    }

    /// The expression resolution is keyed on: one-way first, then two-way
    pub fn effective_expression(&self) -> Option<&FieldExpression<V>> {
        self.one_way.as_ref().or(self.two_way_expression.as_ref())
    }
}

/// What the renderer instantiates: a component type and its bound members
#[derive(Debug, Clone)]
pub struct RenderedComponent<V> {
    pub component: TypeKey,
    pub bound: BoundValue<V>,
}

/// Per-field binding state kept across parameter updates
pub struct FieldBinding<'c, V> {
    catalogue: &'c Catalogue,
    params: BindingParameters<V>,
    resolution: Option<Arc<Resolution>>,
}

impl<'c, V: Clone + 'static> FieldBinding<'c, V> {
    pub fn new(catalogue: &'c Catalogue) -> Self {
        Self {
            catalogue,
            params: BindingParameters::default(),
            resolution: None,
        }
    }

    /// Apply a new parameter set. Returns `true` when the bound expression
    /// changed and the component was resolved again.
    ///
    /// On error the previous parameters and resolution are kept.
    pub fn set_parameters(&mut self, params: BindingParameters<V>) -> Result<bool, CatalogueError> {
        params.validate()?;

        let expression = params
            .effective_expression()
            .ok_or(CatalogueError::MissingBinding)?;

        let changed = self.resolution.is_none()
            || self.params.effective_expression() != Some(expression);

        if changed {
            let resolution = self.resolve(expression)?;
            self.resolution = Some(resolution);
        }

        self.params = params;
        Ok(changed)
    }

    fn resolve(&self, expression: &FieldExpression<V>) -> Result<Arc<Resolution>, CatalogueError> {
        let owner = expression.owner();
        let resolution = self
            .catalogue
            .resolve(owner, expression.field(), TypeKey::of::<V>())?
            .ok_or_else(|| CatalogueError::NoComponent {
                owner: owner.name().to_string(),
                field: expression.field().to_string(),
            })?;

        debug!(
            owner = owner.name(),
            field = expression.field(),
            component = %resolution.component(),
            "Field binding resolved"
        );
        Ok(resolution)
    }

    /// Resolved component type, once parameters were set
    pub fn component(&self) -> Option<TypeKey> {
        self.resolution.as_ref().map(|r| r.component())
    }

    /// Field metadata the component was resolved against
    pub fn field(&self) -> Option<&FieldInfo> {
        self.resolution.as_ref().and_then(|r| r.field())
    }

    /// Component plus the four bindable members for the current cycle
    pub fn render(&self) -> Option<RenderedComponent<V>> {
        let resolution = self.resolution.as_ref()?;
        let expression = self.params.effective_expression()?;

        Some(RenderedComponent {
            component: resolution.component(),
            bound: BoundValue {
                value: expression.get(),
                value_changed: self.params.two_way_changed.clone(),
                value_expression: Some(expression.clone()),
                value_field: resolution.field().cloned(),
            },
        })
    }
}
