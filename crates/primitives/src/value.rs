use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};


/// A raw attribute value as produced by the tree builder.
///
/// Deserializes untagged, so a JSON node's `true`, `12`, `0.5` and `"parent"`
/// map onto `Bool`, `Int`, `Float` and `String` respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	String(String),
}

impl AttrValue {
	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			AttrValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			AttrValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value if this is a `Float` variant.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			AttrValue::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			AttrValue::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the descriptor of the variant held.
	pub fn value_type(&self) -> ValueType {
		match self {
			AttrValue::Bool(_) => ValueType::Bool,
			AttrValue::Int(_) => ValueType::Int,
			AttrValue::Float(_) => ValueType::Float,
			AttrValue::String(_) => ValueType::String,
		}
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		self.value_type().name()
	}

	/// Returns true if the variant held is exactly `ty`.
	pub fn matches_type(&self, ty: ValueType) -> bool {
		self.value_type() == ty
	}

	/// Converts this value to `ty`, or returns `None` when the two are incompatible.
	///
	/// Exact matches are borrowed. `Int` widens to `Float`, and text parses into
	/// `Int`, `Float` or `Bool`. Nothing converts into `String`.
	pub fn coerce(&self, ty: ValueType) -> Option<Cow<'_, AttrValue>> {
		if self.matches_type(ty) {
			return Some(Cow::Borrowed(self));
		}
		let converted = match (self, ty) {
			(AttrValue::Int(v), ValueType::Float) => AttrValue::Float(*v as f64),
			(AttrValue::String(s), ValueType::Int) => AttrValue::Int(s.trim().parse().ok()?),
			(AttrValue::String(s), ValueType::Float) => AttrValue::Float(s.trim().parse().ok()?),
			(AttrValue::String(s), ValueType::Bool) => AttrValue::Bool(parse_bool(s.trim())?),
			_ => return None,
		};
		Some(Cow::Owned(converted))
	}
}

fn parse_bool(s: &str) -> Option<bool> {
	if s.eq_ignore_ascii_case("true") {
		Some(true)
	} else if s.eq_ignore_ascii_case("false") {
		Some(false)
	} else {
		None
	}
}

impl fmt::Display for AttrValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AttrValue::Bool(v) => write!(f, "{v}"),
			AttrValue::Int(v) => write!(f, "{v}"),
			AttrValue::Float(v) => write!(f, "{v}"),
			AttrValue::String(v) => write!(f, "{v:?}"),
		}
	}
}

impl From<bool> for AttrValue {
	fn from(v: bool) -> Self {
		AttrValue::Bool(v)
	}
}

impl From<i64> for AttrValue {
	fn from(v: i64) -> Self {
		AttrValue::Int(v)
	}
}

impl From<f64> for AttrValue {
	fn from(v: f64) -> Self {
		AttrValue::Float(v)
	}
}

impl From<String> for AttrValue {
	fn from(v: String) -> Self {
		AttrValue::String(v)
	}
}

impl From<&str> for AttrValue {
	fn from(v: &str) -> Self {
		AttrValue::String(v.to_string())
	}
}

/// Declared value type of an attribute handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	/// Boolean type.
	Bool,
	/// Integer type.
	Int,
	/// Floating point type.
	Float,
	/// String type.
	String,
}

impl ValueType {
	/// Returns the lowercase name used in diagnostics.
	pub fn name(self) -> &'static str {
		match self {
			ValueType::Bool => "bool",
			ValueType::Int => "int",
			ValueType::Float => "float",
			ValueType::String => "string",
		}
	}

	/// Returns true if `value` can be handed to a handler declared with this type.
	pub fn accepts(self, value: &AttrValue) -> bool {
		value.coerce(self).is_some()
	}
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

mod sealed {
	pub trait Sealed {}
	impl Sealed for bool {}
	impl Sealed for i64 {}
	impl Sealed for f64 {}
	impl Sealed for f32 {}
	impl Sealed for String {}
}

/// Rust types a typed handler can receive.
pub trait FromAttrValue: sealed::Sealed + Sized {
	/// Returns the `ValueType` a handler receiving `Self` declares.
	fn value_type() -> ValueType;

	/// Extracts `Self`, applying the same coercions as [`AttrValue::coerce`].
	fn from_attr(value: &AttrValue) -> Option<Self>;
}

impl FromAttrValue for bool {
	fn value_type() -> ValueType {
		ValueType::Bool
	}

	fn from_attr(value: &AttrValue) -> Option<Self> {
		value.coerce(ValueType::Bool)?.as_bool()
	}
}

impl FromAttrValue for i64 {
	fn value_type() -> ValueType {
		ValueType::Int
	}

	fn from_attr(value: &AttrValue) -> Option<Self> {
		value.coerce(ValueType::Int)?.as_int()
	}
}

impl FromAttrValue for f64 {
	fn value_type() -> ValueType {
		ValueType::Float
	}

	fn from_attr(value: &AttrValue) -> Option<Self> {
		value.coerce(ValueType::Float)?.as_float()
	}
}

impl FromAttrValue for f32 {
	fn value_type() -> ValueType {
		ValueType::Float
	}

	fn from_attr(value: &AttrValue) -> Option<Self> {
		f64::from_attr(value).map(|v| v as f32)
	}
}

impl FromAttrValue for String {
	fn value_type() -> ValueType {
		ValueType::String
	}

	fn from_attr(value: &AttrValue) -> Option<Self> {
		value.as_str().map(str::to_string)
	}
}
