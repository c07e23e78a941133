use std::fmt;

/// Dense identifier assigned to an attribute name on first registration.
///
/// Ids start at 0 and are handed out contiguously, so they double as table
/// indices and bitmask positions.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeId(u32);

impl AttributeId {
	/// Creates an id from its raw index.
	#[inline]
	pub const fn from_u32(index: u32) -> Self {
		Self(index)
	}

	/// Returns the raw index.
	#[inline]
	pub const fn as_u32(self) -> u32 {
		self.0
	}

	/// Returns the index as a `usize` for table access.
	#[inline]
	pub const fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Debug for AttributeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("AttributeId").field(&self.0).finish()
	}
}

impl fmt::Display for AttributeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}
