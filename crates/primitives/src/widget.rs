use std::any::{Any, TypeId};
use std::fmt;

#[cfg(test)]
mod tests;

/// Static descriptor of a host widget class.
///
/// Classes form a single-inheritance chain through `parent`. Two descriptors
/// denote the same class when their names are equal, so a toolkit must give
/// every class a distinct name.
///
/// ```
/// use trellis_primitives::WidgetClass;
///
/// static VIEW: WidgetClass = WidgetClass::root("View");
/// static TEXT_VIEW: WidgetClass = WidgetClass::extends("TextView", &VIEW);
///
/// assert!(TEXT_VIEW.is_a(&VIEW));
/// assert!(!VIEW.is_a(&TEXT_VIEW));
/// ```
pub struct WidgetClass {
	name: &'static str,
	parent: Option<&'static WidgetClass>,
}

impl WidgetClass {
	/// Creates a class with no parent.
	pub const fn root(name: &'static str) -> Self {
		Self { name, parent: None }
	}

	/// Creates a class deriving from `parent`.
	pub const fn extends(name: &'static str, parent: &'static WidgetClass) -> Self {
		Self {
			name,
			parent: Some(parent),
		}
	}

	/// Returns the class name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Returns the direct parent class, if any.
	pub fn parent(&self) -> Option<&'static WidgetClass> {
		self.parent
	}

	/// Returns true if this class is `other` or derives from it.
	pub fn is_a(&self, other: &WidgetClass) -> bool {
		self.ancestry().any(|class| class.name == other.name)
	}

	/// Iterates this class followed by each ancestor up to the root.
	pub fn ancestry(&self) -> impl Iterator<Item = &WidgetClass> {
		std::iter::successors(Some(self), |class| class.parent.map(|p| p as &WidgetClass))
	}
}

impl PartialEq for WidgetClass {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}

impl Eq for WidgetClass {}

impl fmt::Debug for WidgetClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WidgetClass")
			.field("name", &self.name)
			.field("parent", &self.parent.map(|p| p.name))
			.finish()
	}
}

impl fmt::Display for WidgetClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// A host widget instance that attribute handlers mutate.
///
/// Handlers receive `&mut dyn Widget`; typed handlers downcast through `Any`.
pub trait Widget: Any + 'static {
	/// Returns the runtime class of this instance.
	fn class(&self) -> &'static WidgetClass;
}

/// A concrete widget type with a fixed class, used to register typed handlers.
pub trait WidgetType: Widget + Sized {
	/// Class every instance of this type reports.
	const CLASS: &'static WidgetClass;
}

impl dyn Widget {
	/// Returns true if the concrete type behind this widget is `W`.
	pub fn is<W: Widget>(&self) -> bool {
		(self as &dyn Any).is::<W>()
	}

	/// Downcasts to a concrete widget type.
	pub fn downcast_ref<W: Widget>(&self) -> Option<&W> {
		(self as &dyn Any).downcast_ref()
	}

	/// Downcasts to a concrete widget type mutably.
	pub fn downcast_mut<W: Widget>(&mut self) -> Option<&mut W> {
		(self as &mut dyn Any).downcast_mut()
	}
}

/// Target type a handler declares: a widget class, optionally pinned to one concrete type.
///
/// A widget is compatible when its class [`is_a`](WidgetClass::is_a) the
/// declared class and, for pinned targets, its concrete type is the pinned one.
#[derive(Clone, Copy)]
pub struct TargetType {
	class: &'static WidgetClass,
	concrete: Option<(TypeId, &'static str)>,
}

impl TargetType {
	/// Accepts any widget whose class derives from `class`.
	pub const fn class(class: &'static WidgetClass) -> Self {
		Self { class, concrete: None }
	}

	/// Accepts only instances of `W`.
	pub fn of<W: WidgetType>() -> Self {
		Self {
			class: W::CLASS,
			concrete: Some((TypeId::of::<W>(), std::any::type_name::<W>())),
		}
	}

	/// Returns the declared class.
	pub fn widget_class(&self) -> &'static WidgetClass {
		self.class
	}

	/// Returns true if `widget` satisfies this target.
	pub fn accepts(&self, widget: &dyn Widget) -> bool {
		if !widget.class().is_a(self.class) {
			return false;
		}
		match self.concrete {
			Some((type_id, _)) => (widget as &dyn Any).type_id() == type_id,
			None => true,
		}
	}
}

impl PartialEq for TargetType {
	fn eq(&self, other: &Self) -> bool {
		self.class == other.class && self.concrete.map(|c| c.0) == other.concrete.map(|c| c.0)
	}
}

impl Eq for TargetType {}

impl fmt::Debug for TargetType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("TargetType");
		s.field("class", &self.class.name);
		if let Some((_, name)) = self.concrete {
			s.field("concrete", &name);
		}
		s.finish()
	}
}

impl fmt::Display for TargetType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.class.name)
	}
}
