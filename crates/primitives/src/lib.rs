//! Core types shared by the attribute engine: values, type descriptors, widget classes and ids.

/// Dense attribute identifiers.
pub mod id;
/// Dynamically-typed attribute values and their type descriptors.
pub mod value;
/// Widget class descriptors and the widget trait handlers operate on.
pub mod widget;

pub use id::AttributeId;
pub use value::{AttrValue, FromAttrValue, ValueType};
pub use widget::{TargetType, Widget, WidgetClass, WidgetType};
