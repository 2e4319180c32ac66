//! Picks the most applicable component for one field

use tracing::{debug, trace};

use crate::field::{FieldInfo, OwnerType};
use crate::registry::CandidateRegistry;
use crate::types::TypeKey;

/// Winning component for a field, with the metadata it was resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    component: TypeKey,
    field: Option<FieldInfo>,
    value_type: TypeKey,
}

impl Resolution {
    pub fn new(component: TypeKey, field: Option<FieldInfo>, value_type: TypeKey) -> Self {
        Self {
            component,
            field,
            value_type,
        }
    }

    #[inline]
    pub fn component(&self) -> TypeKey {
        self.component
    }

    /// Field metadata found on the owner; `None` when the owner does not
    /// declare the field
    #[inline]
    pub fn field(&self) -> Option<&FieldInfo> {
        self.field.as_ref()
    }

    #[inline]
    pub fn value_type(&self) -> TypeKey {
        self.value_type
    }
}

/// Evaluate every candidate registered for `value_type` and keep the
/// supported one with the strictly highest priority. Ties go to the
/// earliest registration.
pub(crate) fn find_most_applicable(
    registry: &CandidateRegistry,
    owner: &OwnerType,
    field_name: &str,
    value_type: TypeKey,
) -> Option<Resolution> {
    let field = owner.field(field_name);
    let candidates = registry.lookup(value_type);

    if candidates.is_empty() {
        debug!(value_type = %value_type, "No UI candidates registered for value type");
        return None;
    }

    let mut best: Option<(i32, TypeKey)> = None;
    for candidate in candidates.iter() {
        let outcome = candidate.evaluate(Some(owner), field.as_ref());
        trace!(component = %candidate.component(), ?outcome, "Evaluated candidate");

        if let Some(priority) = outcome.priority() {
            if best.map_or(true, |(highest, _)| priority > highest) {
                best = Some((priority, candidate.component()));
            }
        }
    }

    match best {
        Some((priority, component)) => {
            debug!(
                owner = owner.name(),
                field = field_name,
                component = %component,
                priority,
                "Resolved UI component"
            );
            Some(Resolution::new(component, field, value_type))
        }
        None => {
            debug!(
                owner = owner.name(),
                field = field_name,
                candidates = candidates.len(),
                "No candidate supports field"
            );
            None
        }
    }
}
