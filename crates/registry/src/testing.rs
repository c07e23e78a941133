//! Log capture for asserting on reported conditions.
//!
//! [`LogCapture`] is a `tracing_subscriber` layer that records every event
//! emitted on the current thread while its guard is alive.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// One recorded event.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
	pub level: Level,
	pub message: String,
	pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
	/// Returns the recorded value of `name`, if present.
	pub fn field(&self, name: &str) -> Option<&str> {
		self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
	}

	/// Returns the `kind` tag attached by [`AttrError::report`](crate::AttrError::report).
	pub fn kind(&self) -> Option<&str> {
		self.field("kind")
	}
}

/// Shared buffer of captured events.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
	events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
	pub fn new() -> Self {
		Self::default()
	}

	/// Installs this capture as the thread-local default subscriber.
	pub fn install(&self) -> DefaultGuard {
		let subscriber = tracing_subscriber::registry().with(self.clone());
		tracing::subscriber::set_default(subscriber)
	}

	/// Returns a copy of everything captured so far.
	pub fn events(&self) -> Vec<CapturedEvent> {
		self.events.lock().clone()
	}

	/// Returns the `kind` tags of captured events, in emission order.
	pub fn kinds(&self) -> Vec<String> {
		self.events
			.lock()
			.iter()
			.filter_map(|e| e.kind().map(str::to_string))
			.collect()
	}

	/// Counts events tagged with `kind`.
	pub fn count_kind(&self, kind: &str) -> usize {
		self.events.lock().iter().filter(|e| e.kind() == Some(kind)).count()
	}
}

impl<S: Subscriber> Layer<S> for LogCapture {
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		let mut visitor = EventVisitor::default();
		event.record(&mut visitor);
		self.events.lock().push(CapturedEvent {
			level: *event.metadata().level(),
			message: visitor.message,
			fields: visitor.fields,
		});
	}
}

#[derive(Default)]
struct EventVisitor {
	message: String,
	fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
	fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
		if field.name() == "message" {
			self.message = format!("{value:?}");
		} else {
			self.fields.push((field.name().to_string(), format!("{value:?}")));
		}
	}

	fn record_str(&mut self, field: &Field, value: &str) {
		if field.name() == "message" {
			self.message = value.to_string();
		} else {
			self.fields.push((field.name().to_string(), value.to_string()));
		}
	}
}
