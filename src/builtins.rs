//! Standard editor components
//!
//! Scan [`assembly()`] to get a baseline editor for the common value types.
//! Host components registered later with a higher priority override these
//! for the fields they claim.

use crate::assembly::{Assembly, ComponentDescriptor};
use crate::component::{Bindable, BoundValue, UiFor};
use crate::field::{FieldInfo, OwnerType};
use crate::types::Applicability;

/// Name of the built-in assembly
pub const ASSEMBLY_NAME: &str = "uifor.builtins";

/// Field name suffixes that get a multi-line text editor
const MULTILINE_SUFFIXES: &[&str] = &["Description", "Notes"];

macro_rules! editor {
    ($(#[$doc:meta])* $name:ident, $value:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            bound: BoundValue<$value>,
        }

        impl Bindable<$value> for $name {
            fn bound(&self) -> &BoundValue<$value> {
                &self.bound
            }

            fn bound_mut(&mut self) -> &mut BoundValue<$value> {
                &mut self.bound
            }
        }
    };
}

editor!(
    /// Single-line text input
    TextEditor,
    String
);
editor!(
    /// Text area for long-form fields (`*Description`, `*Notes`)
    MultilineTextEditor,
    String
);
editor!(
    /// Masked input for fields whose name mentions `Password`
    PasswordEditor,
    String
);
editor!(IntegerEditor, i32);
editor!(LongEditor, i64);
editor!(DecimalEditor, f64);
editor!(CheckboxEditor, bool);

fn field_name(field: Option<&FieldInfo>) -> &str {
    field.map(FieldInfo::name).unwrap_or_default()
}

impl UiFor<String> for TextEditor {
    fn is_ui_for(_: Option<&OwnerType>, _: Option<&FieldInfo>) -> Applicability {
        Applicability::supported(1)
    }
}

impl UiFor<String> for MultilineTextEditor {
    fn is_ui_for(_: Option<&OwnerType>, field: Option<&FieldInfo>) -> Applicability {
        let name = field_name(field);
        Applicability::when(
            MULTILINE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)),
            2,
        )
    }
}

impl UiFor<String> for PasswordEditor {
    fn is_ui_for(_: Option<&OwnerType>, field: Option<&FieldInfo>) -> Applicability {
        Applicability::when(field_name(field).contains("Password"), 3)
    }
}

impl UiFor<i32> for IntegerEditor {
    fn is_ui_for(_: Option<&OwnerType>, _: Option<&FieldInfo>) -> Applicability {
        Applicability::supported(1)
    }
}

impl UiFor<i64> for LongEditor {
    fn is_ui_for(_: Option<&OwnerType>, _: Option<&FieldInfo>) -> Applicability {
        Applicability::supported(1)
    }
}

impl UiFor<f64> for DecimalEditor {
    fn is_ui_for(_: Option<&OwnerType>, _: Option<&FieldInfo>) -> Applicability {
        Applicability::supported(1)
    }
}

impl UiFor<bool> for CheckboxEditor {
    fn is_ui_for(_: Option<&OwnerType>, _: Option<&FieldInfo>) -> Applicability {
        Applicability::supported(1)
    }
}

/// Assembly holding every built-in editor
pub fn assembly() -> Assembly {
    Assembly::new(ASSEMBLY_NAME)
        .component(ComponentDescriptor::ui_for::<TextEditor, String>())
        .component(ComponentDescriptor::ui_for::<MultilineTextEditor, String>())
        .component(ComponentDescriptor::ui_for::<PasswordEditor, String>())
        .component(ComponentDescriptor::ui_for::<IntegerEditor, i32>())
        .component(ComponentDescriptor::ui_for::<LongEditor, i64>())
        .component(ComponentDescriptor::ui_for::<DecimalEditor, f64>())
        .component(ComponentDescriptor::ui_for::<CheckboxEditor, bool>())
}
