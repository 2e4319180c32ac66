//! Binding parameter validation
//!
//! A field binding is either one-way (an expression to read from) or
//! two-way (value, change callback and expression, all three together).
//! Anything else is rejected before the catalogue is consulted.

use crate::binding::BindingParameters;
use crate::error::CatalogueError;

/// Check that `params` describe exactly one complete binding mode
pub fn validate_parameters<V>(params: &BindingParameters<V>) -> Result<(), CatalogueError> {
    let has_one_way = params.one_way.is_some();

    let has_value = params.two_way.is_some();
    let has_changed = params.two_way_changed.is_some();
    let has_expression = params.two_way_expression.is_some();

    let has_any_two_way = has_value || has_changed || has_expression;
    let has_all_two_way = has_value && has_changed && has_expression;

    if has_one_way && has_all_two_way {
        return Err(CatalogueError::BothBindingModes);
    }

    if has_any_two_way && !has_all_two_way {
        return Err(CatalogueError::IncompleteTwoWay);
    }

    if !has_one_way && !has_any_two_way {
        return Err(CatalogueError::MissingBinding);
    }

    Ok(())
}
