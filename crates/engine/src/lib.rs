//! Attribute processor: applies one node's attributes to one widget.
//!
//! Attributes are applied in a fixed bucket order (see [`Bucket`]): the id
//! attribute first, then ordinary attributes, then constraint attributes, and
//! bias constraints last. Each registered attribute fires at most once per
//! call, and a failing attribute is logged and skipped without affecting the
//! rest.
//!
//! ```
//! use std::sync::Arc;
//!
//! use trellis_engine::AttributeProcessor;
//! use trellis_primitives::{AttrValue, Widget, WidgetClass, WidgetType};
//! use trellis_registry::AttributeRegistry;
//!
//! static VIEW: WidgetClass = WidgetClass::root("View");
//!
//! #[derive(Default)]
//! struct Label {
//! 	id: String,
//! 	text: String,
//! }
//!
//! impl Widget for Label {
//! 	fn class(&self) -> &'static WidgetClass {
//! 		&VIEW
//! 	}
//! }
//!
//! impl WidgetType for Label {
//! 	const CLASS: &'static WidgetClass = &VIEW;
//! }
//!
//! let registry = Arc::new(AttributeRegistry::new());
//! registry.register_typed("id", |w: &mut Label, v: String| {
//! 	w.id = v;
//! 	Ok(())
//! }).unwrap();
//! registry.register_typed("android:text", |w: &mut Label, v: String| {
//! 	w.text = v;
//! 	Ok(())
//! }).unwrap();
//!
//! let mut processor = AttributeProcessor::new(registry);
//! let mut label = Label::default();
//! let text = AttrValue::from("Hi");
//! let id = AttrValue::from("greeting");
//! processor.apply_all(&mut label, [("android:text", &text), ("id", &id)]);
//!
//! assert_eq!(label.id, "greeting");
//! assert_eq!(label.text, "Hi");
//! ```

mod bitmask;
mod classify;
mod config;
mod processor;

pub use bitmask::Bitmask;
pub use classify::{
	Bucket, DEFAULT_BIAS_MARKER, DEFAULT_CONSTRAINT_PREFIX, DEFAULT_ID_KEY, OrderRules, is_constraint_attribute, is_id_attribute,
	is_pure_constraint,
};
pub use config::EngineConfig;
pub use processor::{ApplyReport, AttributeProcessor};
