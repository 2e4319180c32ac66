//! Sample models and a host assembly for the `uifor` inspector
//!
//! Not part of the library: the binary declares this module, and the
//! integration tests and bench pull it in by path.
//!
//! `Order` and `Customer` stand in for application types; the host
//! assembly adds a counter editor that beats the built-in integer editor on
//! `*Count` fields.

use uifor::{
    Applicability, Assembly, Bindable, BoundValue, ComponentDescriptor, FieldInfo, Model, OwnerType,
    UiFor,
};

pub const ASSEMBLY_NAME: &str = "uifor.samples";

#[derive(Debug, Clone, Default)]
pub struct Order {
    pub item_count: i32,
    pub total: i32,
    pub notes: String,
    pub paid: bool,
    reference: String,
}

impl Model for Order {
    fn fields() -> Vec<FieldInfo> {
        vec![
            FieldInfo::public::<Order, i32>("ItemCount"),
            FieldInfo::public::<Order, i32>("Total"),
            FieldInfo::public::<Order, String>("Notes"),
            FieldInfo::public::<Order, bool>("Paid"),
            FieldInfo::private::<Order, String>("Reference"),
        ]
    }
}

impl Order {
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

#[derive(Debug, Clone, Default)]
pub struct Customer {
    pub name: String,
    pub password: String,
    pub age: i32,
    pub balance: f64,
    pub joined_at: i64,
}

impl Model for Customer {
    fn fields() -> Vec<FieldInfo> {
        vec![
            FieldInfo::public::<Customer, String>("Name"),
            FieldInfo::public::<Customer, String>("Password"),
            FieldInfo::public::<Customer, i32>("Age"),
            FieldInfo::public::<Customer, f64>("Balance"),
            FieldInfo::public::<Customer, i64>("JoinedAt"),
        ]
    }
}

/// Owner handle for a sample model, by its short type name
pub fn owner(name: &str) -> Option<OwnerType> {
    match name {
        "Order" => Some(OwnerType::of::<Order>()),
        "Customer" => Some(OwnerType::of::<Customer>()),
        _ => None,
    }
}

/// Non-negative counter input for `*Count` integer fields
#[derive(Debug, Clone, Default)]
pub struct PositiveIntegerEditor {
    bound: BoundValue<i32>,
}

impl UiFor<i32> for PositiveIntegerEditor {
    fn is_ui_for(_: Option<&OwnerType>, field: Option<&FieldInfo>) -> Applicability {
        Applicability::when(field.is_some_and(|f| f.name().ends_with("Count")), 2)
    }
}

impl Bindable<i32> for PositiveIntegerEditor {
    fn bound(&self) -> &BoundValue<i32> {
        &self.bound
    }

    fn bound_mut(&mut self) -> &mut BoundValue<i32> {
        &mut self.bound
    }
}

pub fn assembly() -> Assembly {
    Assembly::new(ASSEMBLY_NAME)
        .component(ComponentDescriptor::ui_for::<PositiveIntegerEditor, i32>())
}
