use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use trellis_primitives::{AttrValue, FromAttrValue, TargetType, ValueType, Widget, WidgetType};

use crate::AttrError;


/// Type-erased attribute body.
///
/// Receives a widget already checked against the handler's target and a value
/// already converted to its declared type.
pub type ApplyFn = dyn Fn(&mut dyn Widget, &AttrValue) -> anyhow::Result<()> + Send + Sync;

/// One attribute's mutation, bound to a target type and a value type.
///
/// Handlers never propagate failure: mismatches and failing bodies surface as
/// [`AttrError`]s. A target or value mismatch is detected before the body runs
/// and leaves the widget untouched. A body that errors or panics keeps any
/// mutation it made before failing.
pub struct Handler {
	name: Box<str>,
	target: TargetType,
	value_type: ValueType,
	apply: Box<ApplyFn>,
}

impl Handler {
	/// Creates a handler from an untyped body.
	pub fn new<F>(name: impl Into<Box<str>>, target: TargetType, value_type: ValueType, apply: F) -> Self
	where
		F: Fn(&mut dyn Widget, &AttrValue) -> anyhow::Result<()> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			target,
			value_type,
			apply: Box::new(apply),
		}
	}

	/// Creates a handler for concrete widget type `W` receiving `V`.
	///
	/// The target is pinned to `W` and the value type comes from `V`.
	pub fn typed<W, V, F>(name: impl Into<Box<str>>, apply: F) -> Self
	where
		W: WidgetType,
		V: FromAttrValue,
		F: Fn(&mut W, V) -> anyhow::Result<()> + Send + Sync + 'static,
	{
		Self::new(name, TargetType::of::<W>(), V::value_type(), move |widget, value| {
			let Some(widget) = widget.downcast_mut::<W>() else {
				anyhow::bail!("widget is not a {}", std::any::type_name::<W>());
			};
			let Some(value) = V::from_attr(value) else {
				anyhow::bail!("value {value} does not convert to {}", V::value_type());
			};
			apply(widget, value)
		})
	}

	/// Returns the attribute name this handler was created for.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the declared target type.
	pub fn target(&self) -> TargetType {
		self.target
	}

	/// Returns the declared value type.
	pub fn value_type(&self) -> ValueType {
		self.value_type
	}

	/// Applies the handler, returning the condition that stopped it, if any.
	///
	/// Does not log.
	pub fn try_process(&self, widget: &mut dyn Widget, value: &AttrValue) -> Result<(), AttrError> {
		if !self.target.accepts(widget) {
			return Err(AttrError::TargetTypeMismatch {
				attribute: self.name.to_string(),
				expected: format!("{:?}", self.target),
				widget: widget.class().name(),
			});
		}

		let Some(coerced) = value.coerce(self.value_type) else {
			return Err(AttrError::ValueTypeMismatch {
				attribute: self.name.to_string(),
				expected: self.value_type,
				value: value.clone(),
			});
		};

		let widget_class = widget.class().name();
		let outcome = panic::catch_unwind(AssertUnwindSafe(|| (self.apply)(widget, &coerced)));
		let message = match outcome {
			Ok(Ok(())) => return Ok(()),
			Ok(Err(err)) => format!("{err:#}"),
			Err(payload) => panic_message(payload.as_ref()),
		};
		Err(AttrError::HandlerFailure {
			attribute: self.name.to_string(),
			widget: widget_class,
			value: value.clone(),
			message,
		})
	}

	/// Applies the handler, reporting any failure through `tracing`.
	///
	/// Returns true if the body ran to completion.
	pub fn process(&self, widget: &mut dyn Widget, value: &AttrValue) -> bool {
		match self.try_process(widget, value) {
			Ok(()) => true,
			Err(err) => {
				err.report();
				false
			}
		}
	}
}

impl fmt::Debug for Handler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Handler")
			.field("name", &self.name)
			.field("target", &self.target)
			.field("value_type", &self.value_type)
			.finish_non_exhaustive()
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(msg) = payload.downcast_ref::<&'static str>() {
		format!("panicked: {msg}")
	} else if let Some(msg) = payload.downcast_ref::<String>() {
		format!("panicked: {msg}")
	} else {
		"<unknown panic>".to_string()
	}
}
