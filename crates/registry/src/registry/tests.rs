use std::sync::{Arc, Barrier};

use trellis_primitives::{AttrValue, AttributeId, TargetType, ValueType};

use super::AttributeRegistry;
use crate::AttrError;
use crate::test_fixtures::{ImageView, TextView, VIEW};
use crate::testing::LogCapture;

fn noop_registry(names: &[&str]) -> AttributeRegistry {
	let registry = AttributeRegistry::new();
	for name in names {
		registry
			.register(name, TargetType::class(&VIEW), ValueType::String, |_, _| Ok(()))
			.unwrap();
	}
	registry
}

fn register_fixture_feature(registry: &AttributeRegistry) {
	let _ = registry.register_typed("fixture:src", |w: &mut ImageView, v: String| {
		w.source = Some(v);
		Ok(())
	});
}

crate::attribute_feature!("fixture", register_fixture_feature);

#[test]
fn test_ids_are_dense_from_zero() {
	let registry = noop_registry(&["id", "android:text", "layout_width"]);
	assert_eq!(registry.resolve_id("id"), Some(AttributeId::from_u32(0)));
	assert_eq!(registry.resolve_id("android:text"), Some(AttributeId::from_u32(1)));
	assert_eq!(registry.resolve_id("layout_width"), Some(AttributeId::from_u32(2)));
	assert_eq!(registry.len(), 3);
	assert_eq!(registry.names(), ["id", "android:text", "layout_width"]);
}

#[test]
fn test_handler_keeps_declared_types() {
	let registry = AttributeRegistry::new();
	let id = registry
		.register("layout_constraintHorizontal_bias", TargetType::class(&VIEW), ValueType::Float, |_, _| Ok(()))
		.unwrap();
	let text = registry
		.register_typed("android:text", |w: &mut TextView, v: String| {
			w.text = v;
			Ok(())
		})
		.unwrap();

	let handler = registry.handler(id).unwrap();
	assert_eq!(handler.target(), TargetType::class(&VIEW));
	assert_eq!(handler.value_type(), ValueType::Float);

	let handler = registry.handler(text).unwrap();
	assert_eq!(handler.target(), TargetType::of::<TextView>());
	assert_eq!(handler.value_type(), ValueType::String);
}

#[test]
fn test_lookups_are_case_sensitive() {
	let registry = noop_registry(&["android:text"]);
	assert!(registry.resolve_id("android:text").is_some());
	assert!(registry.resolve_id("Android:Text").is_none());
	assert!(registry.handler_by_name("ANDROID:TEXT").is_none());
}

#[test]
fn test_unknown_id_resolves_to_none() {
	let registry = noop_registry(&["id"]);
	assert!(registry.handler(AttributeId::from_u32(1)).is_none());
	assert!(registry.resolve_id("missing").is_none());
}

#[test]
fn test_duplicate_registration_keeps_first() {
	let capture = LogCapture::new();
	let _guard = capture.install();

	let registry = AttributeRegistry::new();
	let first = registry
		.register_typed("android:text", |w: &mut TextView, v: String| {
			w.text = format!("first:{v}");
			Ok(())
		})
		.unwrap();
	let second = registry.register_typed("android:text", |w: &mut TextView, v: String| {
		w.text = format!("second:{v}");
		Ok(())
	});

	assert_eq!(
		second,
		Err(AttrError::DuplicateRegistration {
			name: "android:text".into(),
			existing: first,
		})
	);
	assert_eq!(registry.len(), 1);
	assert_eq!(capture.count_kind("duplicate_registration"), 1);

	let mut widget = TextView::default();
	assert!(registry.handler(first).unwrap().process(&mut widget, &AttrValue::from("Hi")));
	assert_eq!(widget.text, "first:Hi");
}

#[test]
fn test_duplicate_with_other_types_is_rejected() {
	let registry = noop_registry(&["id"]);
	let err = registry
		.register("id", TargetType::class(&VIEW), ValueType::Int, |_, _| Ok(()))
		.unwrap_err();
	assert_eq!(err.kind(), "duplicate_registration");
	assert_eq!(registry.handler_by_name("id").unwrap().value_type(), ValueType::String);
}

#[test]
fn test_snapshot_is_stable_across_writes() {
	let registry = noop_registry(&["a"]);
	let pinned = registry.snapshot();
	registry
		.register("b", TargetType::class(&VIEW), ValueType::String, |_, _| Ok(()))
		.unwrap();

	assert_eq!(pinned.len(), 1);
	assert!(pinned.resolve_id("b").is_none());
	assert_eq!(registry.snapshot().len(), 2);
}

#[test]
fn test_reset_restarts_ids() {
	let registry = noop_registry(&["a", "b"]);
	let pinned = registry.snapshot();
	registry.reset();

	assert!(registry.is_empty());
	assert_eq!(pinned.len(), 2, "pinned snapshot outlives reset");

	let id = registry
		.register("c", TargetType::class(&VIEW), ValueType::String, |_, _| Ok(()))
		.unwrap();
	assert_eq!(id, AttributeId::from_u32(0));
}

#[test]
fn test_concurrent_distinct_names() {
	let registry = AttributeRegistry::new();
	let barrier = Barrier::new(2);
	let (a, b) = std::thread::scope(|s| {
		let a = s.spawn(|| {
			barrier.wait();
			registry.register("a", TargetType::class(&VIEW), ValueType::String, |_, _| Ok(()))
		});
		let b = s.spawn(|| {
			barrier.wait();
			registry.register("b", TargetType::class(&VIEW), ValueType::String, |_, _| Ok(()))
		});
		(a.join().unwrap(), b.join().unwrap())
	});

	let (a, b) = (a.unwrap(), b.unwrap());
	assert_ne!(a, b);
	assert_eq!(registry.len(), 2);
	assert_eq!(registry.resolve_id("a"), Some(a));
	assert_eq!(registry.resolve_id("b"), Some(b));
}

#[test]
fn test_concurrent_registration_is_linearizable() {
	const THREADS: usize = 8;
	const PER_THREAD: usize = 50;

	let registry = Arc::new(AttributeRegistry::new());
	let barrier = Arc::new(Barrier::new(THREADS));
	let handles: Vec<_> = (0..THREADS)
		.map(|t| {
			let registry = Arc::clone(&registry);
			let barrier = Arc::clone(&barrier);
			std::thread::spawn(move || {
				barrier.wait();
				let mut won = 0;
				for i in 0..PER_THREAD {
					// Every thread races on the shared names, and owns its private ones.
					let shared = format!("shared_{i}");
					let private = format!("t{t}_{i}");
					for name in [shared, private] {
						if registry
							.register(&name, TargetType::class(&VIEW), ValueType::String, |_, _| Ok(()))
							.is_ok()
						{
							won += 1;
						}
					}
				}
				won
			})
		})
		.collect();

	let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
	assert_eq!(total, PER_THREAD + THREADS * PER_THREAD);
	assert_eq!(registry.len(), total);

	let mut ids: Vec<u32> = registry
		.names()
		.iter()
		.map(|n| registry.resolve_id(n).unwrap().as_u32())
		.collect();
	ids.sort_unstable();
	let expected: Vec<u32> = (0..total as u32).collect();
	assert_eq!(ids, expected, "ids must be contiguous with no gaps");
}

#[test]
fn test_install_features_runs_submitted_features() {
	let registry = AttributeRegistry::new();
	assert!(registry.install_features() >= 1);
	let id = registry.resolve_id("fixture:src").expect("fixture feature installed");

	let mut image = ImageView::default();
	registry.handler(id).unwrap().process(&mut image, &AttrValue::from("@logo"));
	assert_eq!(image.source.as_deref(), Some("@logo"));

	let before = registry.len();
	registry.install_features();
	assert_eq!(registry.len(), before, "second install adds nothing");
}

#[test]
fn test_global_registry_includes_features() {
	assert!(AttributeRegistry::global().resolve_id("fixture:src").is_some());
}

#[test]
fn test_debug_lists_names() {
	let registry = noop_registry(&["id"]);
	let debug = format!("{registry:?}");
	assert!(debug.contains("AttributeRegistry"));
	assert!(debug.contains("\"id\""));
}
