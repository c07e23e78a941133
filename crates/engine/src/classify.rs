//! Bucket classification for attribute names.
//!
//! Matching here is ASCII case-insensitive, unlike registry lookups.

use serde::{Deserialize, Serialize};


/// Reserved identifier attribute.
pub const DEFAULT_ID_KEY: &str = "id";
/// Prefix shared by layout constraint attributes.
pub const DEFAULT_CONSTRAINT_PREFIX: &str = "layout_constraint";
/// Marker separating bias constraints from the rest.
pub const DEFAULT_BIAS_MARKER: &str = "bias";

/// Processing phase of an attribute. Variants are declared in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
	/// The identifier attribute.
	Id,
	/// Anything that is neither id nor constraint.
	Normal,
	/// Constraint attributes without the bias marker.
	PureConstraint,
	/// Constraint attributes with the bias marker.
	Bias,
}

impl Bucket {
	/// Every bucket, in application order.
	pub const ORDER: [Bucket; 4] = [Bucket::Id, Bucket::Normal, Bucket::PureConstraint, Bucket::Bias];

	pub fn name(self) -> &'static str {
		match self {
			Bucket::Id => "id",
			Bucket::Normal => "normal",
			Bucket::PureConstraint => "pure_constraint",
			Bucket::Bias => "bias",
		}
	}
}

/// Reserved strings that drive bucket classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct OrderRules {
	pub id_key: String,
	pub constraint_prefix: String,
	pub bias_marker: String,
}

impl Default for OrderRules {
	fn default() -> Self {
		Self {
			id_key: DEFAULT_ID_KEY.to_string(),
			constraint_prefix: DEFAULT_CONSTRAINT_PREFIX.to_string(),
			bias_marker: DEFAULT_BIAS_MARKER.to_string(),
		}
	}
}

impl OrderRules {
	/// True if `name` is the identifier attribute, ignoring case.
	pub fn is_id(&self, name: &str) -> bool {
		name.eq_ignore_ascii_case(&self.id_key)
	}

	/// True if `name` starts with the constraint prefix, ignoring case.
	pub fn is_constraint(&self, name: &str) -> bool {
		starts_with_ignore_case(name, &self.constraint_prefix)
	}

	/// True if `name` is a constraint that does not mention the bias marker.
	pub fn is_pure_constraint(&self, name: &str) -> bool {
		self.is_constraint(name) && !contains_ignore_case(name, &self.bias_marker)
	}

	pub fn classify(&self, name: &str) -> Bucket {
		if self.is_id(name) {
			Bucket::Id
		} else if !self.is_constraint(name) {
			Bucket::Normal
		} else if contains_ignore_case(name, &self.bias_marker) {
			Bucket::Bias
		} else {
			Bucket::PureConstraint
		}
	}
}

/// [`OrderRules::is_id`] with the default rules.
pub fn is_id_attribute(name: &str) -> bool {
	name.eq_ignore_ascii_case(DEFAULT_ID_KEY)
}

/// [`OrderRules::is_constraint`] with the default rules.
pub fn is_constraint_attribute(name: &str) -> bool {
	starts_with_ignore_case(name, DEFAULT_CONSTRAINT_PREFIX)
}

/// [`OrderRules::is_pure_constraint`] with the default rules.
pub fn is_pure_constraint(name: &str) -> bool {
	is_constraint_attribute(name) && !contains_ignore_case(name, DEFAULT_BIAS_MARKER)
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
	haystack
		.as_bytes()
		.get(..prefix.len())
		.is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
	if needle.is_empty() {
		return true;
	}
	haystack
		.as_bytes()
		.windows(needle.len())
		.any(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}
