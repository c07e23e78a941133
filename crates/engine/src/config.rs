use serde::{Deserialize, Serialize};

use crate::OrderRules;

/// Processor settings. Every field is optional when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Reserved names that decide application order.
	pub order: OrderRules,
	/// Words preallocated for the applied-attribute bitmask; 64 ids per word.
	pub initial_bitmask_words: usize,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			order: OrderRules::default(),
			initial_bitmask_words: 4,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_config_is_default() {
		let config: EngineConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, EngineConfig::default());
	}

	#[test]
	fn test_partial_order_section() {
		let config: EngineConfig = serde_json::from_str(r#"{ "order": { "id_key": "name" }, "initial_bitmask_words": 1 }"#).unwrap();
		assert_eq!(config.order.id_key, "name");
		assert_eq!(config.order.bias_marker, "bias");
		assert_eq!(config.initial_bitmask_words, 1);
	}
}
