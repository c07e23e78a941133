//! Startup registration of attribute sets via `inventory`.

use crate::AttributeRegistry;

/// A named group of attribute registrations contributed by one module.
///
/// Submit with [`attribute_feature!`](crate::attribute_feature); features run
/// when [`AttributeRegistry::install_features`] is called, which the global
/// registry does on first use.
pub struct AttributeFeature {
	/// Feature name, used for ordering and logging.
	pub name: &'static str,
	/// Registers the feature's attributes.
	pub register: fn(&AttributeRegistry),
}

inventory::collect!(AttributeFeature);

/// Submits an [`AttributeFeature`] for installation at startup.
///
/// ```ignore
/// fn register_text(registry: &AttributeRegistry) {
/// 	let _ = registry.register_typed("android:text", |w: &mut TextView, v: String| {
/// 		w.text = v;
/// 		Ok(())
/// 	});
/// }
///
/// trellis_registry::attribute_feature!("text", register_text);
/// ```
#[macro_export]
macro_rules! attribute_feature {
	($name:expr, $register:path) => {
		$crate::inventory::submit! {
			$crate::AttributeFeature {
				name: $name,
				register: $register,
			}
		}
	};
}

impl AttributeRegistry {
	/// Runs every submitted feature against this registry, in name order.
	///
	/// Returns the number of features run. Installing twice is harmless: the
	/// second pass is rejected name by name.
	pub fn install_features(&self) -> usize {
		let mut features: Vec<&AttributeFeature> = inventory::iter::<AttributeFeature>.into_iter().collect();
		features.sort_by_key(|f| f.name);
		for feature in &features {
			let before = self.len();
			(feature.register)(self);
			tracing::debug!(feature = feature.name, added = self.len().saturating_sub(before), "attribute feature installed");
		}
		features.len()
	}
}
