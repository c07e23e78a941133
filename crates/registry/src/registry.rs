//! Thread-safe attribute directory with snapshot publication.
//!
//! # Concurrency
//!
//! * Readers load the current [`RegistrySnapshot`] through `ArcSwap` and never block.
//! * Writers first check the loaded snapshot without locking, then take the
//!   write lock, re-check against the latest snapshot and publish a copy with
//!   the new entry appended.
//! * A name is bound to one id for the registry's lifetime; the first
//!   registration wins and later ones are rejected.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;
use trellis_primitives::{AttrValue, AttributeId, FromAttrValue, TargetType, ValueType, Widget, WidgetType};

use crate::{AttrError, Handler};

#[cfg(test)]
mod tests;

static GLOBAL: LazyLock<Arc<AttributeRegistry>> = LazyLock::new(|| {
	let registry = AttributeRegistry::new();
	registry.install_features();
	Arc::new(registry)
});

/// Immutable view of the registry tables at one point in time.
#[derive(Debug, Default, Clone)]
pub struct RegistrySnapshot {
	by_name: HashMap<Box<str>, AttributeId>,
	table: Vec<Arc<Handler>>,
}

impl RegistrySnapshot {
	/// Resolves a name by exact match.
	#[inline]
	pub fn resolve_id(&self, name: &str) -> Option<AttributeId> {
		self.by_name.get(name).copied()
	}

	/// Returns the handler bound to `id`.
	#[inline]
	pub fn handler(&self, id: AttributeId) -> Option<&Arc<Handler>> {
		self.table.get(id.index())
	}

	/// Returns the number of registered attributes.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Iterates `(id, handler)` pairs in id order.
	pub fn iter(&self) -> impl Iterator<Item = (AttributeId, &Arc<Handler>)> {
		self.table
			.iter()
			.enumerate()
			.map(|(i, h)| (AttributeId::from_u32(i as u32), h))
	}
}

/// Process-wide directory from attribute names to ids and handlers.
///
/// Construct independent instances with [`AttributeRegistry::new`] and inject
/// them into processors, or use [`AttributeRegistry::global`].
pub struct AttributeRegistry {
	snap: ArcSwap<RegistrySnapshot>,
	write: Mutex<()>,
}

impl Default for AttributeRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl AttributeRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(RegistrySnapshot::default()),
			write: Mutex::new(()),
		}
	}

	/// Returns the default process-wide registry.
	///
	/// Created on first use and populated from every submitted [`AttributeFeature`](crate::AttributeFeature).
	pub fn global() -> &'static Arc<AttributeRegistry> {
		&GLOBAL
	}

	/// Registers `apply` under `name`.
	///
	/// Returns the newly assigned id, or [`AttrError::DuplicateRegistration`]
	/// if the name is already bound. Rejections are logged; the existing
	/// binding is left untouched.
	pub fn register<F>(&self, name: &str, target: TargetType, value_type: ValueType, apply: F) -> Result<AttributeId, AttrError>
	where
		F: Fn(&mut dyn Widget, &AttrValue) -> anyhow::Result<()> + Send + Sync + 'static,
	{
		self.register_handler(Handler::new(name, target, value_type, apply))
	}

	/// Registers a handler for concrete widget type `W` receiving `V`.
	pub fn register_typed<W, V, F>(&self, name: &str, apply: F) -> Result<AttributeId, AttrError>
	where
		W: WidgetType,
		V: FromAttrValue,
		F: Fn(&mut W, V) -> anyhow::Result<()> + Send + Sync + 'static,
	{
		self.register_handler(Handler::typed(name, apply))
	}

	/// Registers a prebuilt handler under its own name.
	pub fn register_handler(&self, handler: Handler) -> Result<AttributeId, AttrError> {
		if let Some(existing) = self.resolve_id(handler.name()) {
			return Err(reject(handler.name(), existing));
		}

		let _guard = self.write.lock();
		let current = self.snap.load_full();
		if let Some(existing) = current.resolve_id(handler.name()) {
			return Err(reject(handler.name(), existing));
		}

		let Ok(index) = u32::try_from(current.table.len()) else {
			let err = AttrError::Exhausted {
				name: handler.name().to_string(),
			};
			err.report();
			return Err(err);
		};
		let id = AttributeId::from_u32(index);

		let mut next = RegistrySnapshot::clone(&current);
		next.by_name.insert(handler.name().into(), id);
		tracing::debug!(attribute = handler.name(), %id, target = %handler.target(), value_type = %handler.value_type(), "attribute registered");
		next.table.push(Arc::new(handler));
		self.snap.store(Arc::new(next));
		Ok(id)
	}

	/// Resolves a name by exact, case-sensitive match.
	#[inline]
	pub fn resolve_id(&self, name: &str) -> Option<AttributeId> {
		self.snap.load().resolve_id(name)
	}

	/// Returns the handler bound to `id`.
	#[inline]
	pub fn handler(&self, id: AttributeId) -> Option<Arc<Handler>> {
		self.snap.load().handler(id).cloned()
	}

	/// Returns the handler bound to `name`.
	pub fn handler_by_name(&self, name: &str) -> Option<Arc<Handler>> {
		let snap = self.snap.load();
		let id = snap.resolve_id(name)?;
		snap.handler(id).cloned()
	}

	/// Pins the current tables for a batch of lookups.
	pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
		self.snap.load_full()
	}

	/// Returns registered names in id order.
	pub fn names(&self) -> Vec<String> {
		self.snap.load().iter().map(|(_, h)| h.name().to_string()).collect()
	}

	/// Returns the number of registered attributes.
	pub fn len(&self) -> usize {
		self.snap.load().len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Drops every registration and restarts ids at 0.
	///
	/// Intended for test isolation. Snapshots pinned before the reset keep
	/// their contents.
	pub fn reset(&self) {
		let _guard = self.write.lock();
		self.snap.store(Arc::new(RegistrySnapshot::default()));
		tracing::debug!("attribute registry reset");
	}
}

impl std::fmt::Debug for AttributeRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AttributeRegistry")
			.field("count", &self.len())
			.field("names", &self.names())
			.finish()
	}
}

fn reject(name: &str, existing: AttributeId) -> AttrError {
	let err = AttrError::DuplicateRegistration {
		name: name.to_string(),
		existing,
	};
	err.report();
	err
}
