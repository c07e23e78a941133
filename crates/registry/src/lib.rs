//! Attribute registry: binds attribute names to dense ids and type-checked handlers.
//!
//! Feature modules register handlers once at startup, either directly through
//! [`AttributeRegistry::register`] or by submitting an [`AttributeFeature`] that
//! [`AttributeRegistry::install_features`] picks up. Lookups afterwards are
//! lock-free snapshot reads.
//!
//! ```
//! use trellis_primitives::{TargetType, ValueType, WidgetClass};
//! use trellis_registry::AttributeRegistry;
//!
//! static VIEW: WidgetClass = WidgetClass::root("View");
//!
//! let registry = AttributeRegistry::new();
//! let id = registry
//! 	.register("id", TargetType::class(&VIEW), ValueType::String, |_widget, _value| Ok(()))
//! 	.unwrap();
//!
//! assert_eq!(registry.resolve_id("id"), Some(id));
//! assert!(registry.register("id", TargetType::class(&VIEW), ValueType::Int, |_, _| Ok(())).is_err());
//! ```

mod error;
mod feature;
mod handler;
mod registry;
#[cfg(test)]
mod test_fixtures;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::AttrError;
pub use feature::AttributeFeature;
pub use handler::{ApplyFn, Handler};
#[doc(hidden)]
pub use inventory;
pub use registry::{AttributeRegistry, RegistrySnapshot};
