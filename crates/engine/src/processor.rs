//! Ordered, exactly-once attribute application.

use std::sync::Arc;

use smallvec::SmallVec;
use trellis_primitives::{AttrValue, Widget};
use trellis_registry::{AttrError, AttributeRegistry, RegistrySnapshot};

use crate::{Bitmask, Bucket, EngineConfig, OrderRules};


/// Counts from one [`AttributeProcessor::apply_all_with_report`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
	/// Handlers that ran to completion.
	pub applied: usize,
	/// Names with no registration.
	pub unknown: usize,
	/// Entries skipped because their attribute already fired in this call.
	pub duplicates: usize,
	/// Handlers that were skipped on a type mismatch or whose body failed.
	pub failed: usize,
}

/// Applies a node's attributes to its widget in bucket order.
///
/// Owns a reusable [`Bitmask`], so one processor serves one pipeline at a
/// time; `apply_all` takes `&mut self`.
#[derive(Debug)]
pub struct AttributeProcessor {
	registry: Arc<AttributeRegistry>,
	rules: OrderRules,
	applied: Bitmask,
}

impl AttributeProcessor {
	pub fn new(registry: Arc<AttributeRegistry>) -> Self {
		Self::with_config(registry, EngineConfig::default())
	}

	pub fn with_config(registry: Arc<AttributeRegistry>, config: EngineConfig) -> Self {
		Self {
			registry,
			rules: config.order,
			applied: Bitmask::with_words(config.initial_bitmask_words),
		}
	}

	/// Creates a processor over [`AttributeRegistry::global`].
	pub fn global() -> Self {
		Self::new(Arc::clone(AttributeRegistry::global()))
	}

	pub fn registry(&self) -> &Arc<AttributeRegistry> {
		&self.registry
	}

	pub fn rules(&self) -> &OrderRules {
		&self.rules
	}

	/// Applies every recognized attribute to `widget`.
	///
	/// See [`apply_all_with_report`](Self::apply_all_with_report).
	pub fn apply_all<'n, 'v, I>(&mut self, widget: &mut dyn Widget, attributes: I)
	where
		I: IntoIterator<Item = (&'n str, &'v AttrValue)>,
	{
		self.apply_all_with_report(widget, attributes);
	}

	/// Applies every recognized attribute to `widget` and counts the outcomes.
	///
	/// Order is id, then normal, then pure constraints, then bias constraints;
	/// within a bucket input order is kept. Each registered attribute fires at
	/// most once per call. Unknown names and failing handlers are reported
	/// through `tracing` and skipped.
	pub fn apply_all_with_report<'n, 'v, I>(&mut self, widget: &mut dyn Widget, attributes: I) -> ApplyReport
	where
		I: IntoIterator<Item = (&'n str, &'v AttrValue)>,
	{
		self.applied.clear();
		let snapshot = self.registry.snapshot();
		let _span = tracing::trace_span!("apply_all", widget = widget.class().name()).entered();

		let mut pass = Pass {
			snapshot: &snapshot,
			applied: &mut self.applied,
			report: ApplyReport::default(),
		};

		let mut deferred: SmallVec<[(Bucket, &str, &AttrValue); 16]> = SmallVec::new();
		for (name, value) in attributes {
			match self.rules.classify(name) {
				Bucket::Id => pass.dispatch(widget, name, value),
				bucket => deferred.push((bucket, name, value)),
			}
		}

		deferred.sort_by_key(|&(bucket, ..)| bucket);
		for (_, name, value) in deferred {
			pass.dispatch(widget, name, value);
		}

		let report = pass.report;
		tracing::trace!(
			applied = report.applied,
			unknown = report.unknown,
			duplicates = report.duplicates,
			failed = report.failed,
			"attributes applied"
		);
		report
	}
}

/// State shared by every dispatch in one `apply_all` call.
struct Pass<'p> {
	snapshot: &'p RegistrySnapshot,
	applied: &'p mut Bitmask,
	report: ApplyReport,
}

impl Pass<'_> {
	fn dispatch(&mut self, widget: &mut dyn Widget, name: &str, value: &AttrValue) {
		let Some(id) = self.snapshot.resolve_id(name) else {
			AttrError::UnknownAttribute { name: name.to_string() }.report();
			self.report.unknown += 1;
			return;
		};

		if !self.applied.set_if_not_set(id) {
			self.report.duplicates += 1;
			return;
		}

		let Some(handler) = self.snapshot.handler(id) else {
			AttrError::UnknownId { id }.report();
			self.report.unknown += 1;
			return;
		};

		if handler.process(widget, value) {
			tracing::trace!(attribute = name, %id, %value, "attribute applied");
			self.report.applied += 1;
		} else {
			self.report.failed += 1;
		}
	}
}
