use trellis_primitives::{AttrValue, AttributeId, ValueType};

/// Conditions raised while registering or applying attributes.
///
/// None of these abort an inflation pass. They are reported through
/// [`AttrError::report`] and the offending attribute is skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttrError {
	/// The name has no registered handler.
	#[error("unknown attribute {name:?}")]
	UnknownAttribute { name: String },

	/// An id has no handler in the current table.
	#[error("no handler registered for attribute id {id}")]
	UnknownId { id: AttributeId },

	/// The widget's class does not satisfy the handler's declared target.
	#[error("attribute {attribute:?} targets {expected}, widget is {widget}")]
	TargetTypeMismatch {
		attribute: String,
		expected: String,
		widget: &'static str,
	},

	/// The value cannot be converted to the handler's declared type.
	#[error("attribute {attribute:?} expects {expected}, got {} {value}", .value.type_name())]
	ValueTypeMismatch {
		attribute: String,
		expected: ValueType,
		value: AttrValue,
	},

	/// The handler body returned an error or panicked.
	#[error("attribute {attribute:?} failed on {widget} with value {value}: {message}")]
	HandlerFailure {
		attribute: String,
		widget: &'static str,
		value: AttrValue,
		message: String,
	},

	/// The name was registered before; the first registration is kept.
	#[error("attribute {name:?} is already registered as {existing}")]
	DuplicateRegistration { name: String, existing: AttributeId },

	/// The id space is used up.
	#[error("attribute id space exhausted registering {name:?}")]
	Exhausted { name: String },
}

impl AttrError {
	/// Returns a stable snake_case tag for this condition.
	pub fn kind(&self) -> &'static str {
		match self {
			AttrError::UnknownAttribute { .. } => "unknown_attribute",
			AttrError::UnknownId { .. } => "unknown_id",
			AttrError::TargetTypeMismatch { .. } => "target_type_mismatch",
			AttrError::ValueTypeMismatch { .. } => "value_type_mismatch",
			AttrError::HandlerFailure { .. } => "handler_failure",
			AttrError::DuplicateRegistration { .. } => "duplicate_registration",
			AttrError::Exhausted { .. } => "exhausted",
		}
	}

	/// Emits this condition as a `tracing` event.
	///
	/// Handler failures and id exhaustion log at `error`, everything else at `warn`.
	pub fn report(&self) {
		let kind = self.kind();
		match self {
			AttrError::HandlerFailure {
				attribute,
				widget,
				value,
				message,
			} => {
				tracing::error!(kind, attribute = %attribute, widget, %value, error = %message, "attribute handler failed");
			}
			AttrError::Exhausted { name } => {
				tracing::error!(kind, attribute = %name, "attribute id space exhausted");
			}
			AttrError::UnknownAttribute { name } => {
				tracing::warn!(kind, attribute = %name, "unknown attribute");
			}
			AttrError::UnknownId { id } => {
				tracing::warn!(kind, %id, "no handler for attribute id");
			}
			AttrError::DuplicateRegistration { name, existing } => {
				tracing::warn!(kind, attribute = %name, id = %existing, "attribute already registered, keeping first");
			}
			AttrError::TargetTypeMismatch {
				attribute,
				expected,
				widget,
			} => {
				tracing::warn!(kind, attribute = %attribute, widget, expected = %expected, "attribute target mismatch, skipped");
			}
			AttrError::ValueTypeMismatch {
				attribute,
				expected,
				value,
			} => {
				tracing::warn!(kind, attribute = %attribute, expected = %expected, %value, "attribute value mismatch, skipped");
			}
		}
	}
}
