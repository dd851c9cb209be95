//! Factory settings.
//!
//! Settings can be built in code, deserialized from JSON, or read from
//! `REINHARDT_FACTORY_*` environment variables.

use serde::{Deserialize, Serialize};

use crate::error::{SeedingError, SeedingResult};

/// Environment variable holding the maximum nesting depth.
pub const MAX_DEPTH_VAR: &str = "REINHARDT_FACTORY_MAX_DEPTH";

/// Environment variable enabling attribute values in trace logs.
pub const LOG_VALUES_VAR: &str = "REINHARDT_FACTORY_LOG_VALUES";

/// Behaviour knobs for a [`Seeder`](crate::Seeder).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorySettings {
	/// Maximum number of factory materializations active at once.
	///
	/// The outermost `build`/`create` counts as one. `None` means unbounded,
	/// in which case a self-referencing factory recurses until the stack is
	/// exhausted.
	pub max_depth: Option<usize>,

	/// Include merged attributes in materialization trace logs.
	pub log_values: bool,
}

impl FactorySettings {
	/// Creates default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the maximum nesting depth.
	///
	/// A depth of zero leaves no room for the outermost materialization, so
	/// every `build`/`create` fails with
	/// [`SeedingError::RecursionLimit`]. The loaders reject zero.
	pub fn with_max_depth(mut self, depth: usize) -> Self {
		self.max_depth = Some(depth);
		self
	}

	/// Sets whether trace logs include attribute values.
	pub fn with_log_values(mut self, enabled: bool) -> Self {
		self.log_values = enabled;
		self
	}

	/// Parses settings from a JSON document.
	///
	/// Missing keys fall back to their defaults.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::Json`] for malformed documents and
	/// [`SeedingError::InvalidSetting`] for a `max_depth` of zero.
	pub fn from_json(json: &str) -> SeedingResult<Self> {
		let settings: Self = serde_json::from_str(json)?;
		if settings.max_depth == Some(0) {
			return Err(SeedingError::InvalidSetting {
				key: "max_depth".to_string(),
				value: "0".to_string(),
			});
		}
		Ok(settings)
	}

	/// Reads settings from the process environment.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::InvalidSetting`] when a variable is set but
	/// cannot be parsed, or when the maximum depth is zero.
	pub fn from_env() -> SeedingResult<Self> {
		Self::from_vars(|key| std::env::var(key).ok())
	}

	/// Reads settings through an arbitrary variable lookup.
	pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> SeedingResult<Self> {
		let mut settings = Self::default();

		if let Some(raw) = lookup(MAX_DEPTH_VAR) {
			let depth = raw
				.trim()
				.parse::<usize>()
				.ok()
				.filter(|depth| *depth > 0)
				.ok_or_else(|| SeedingError::InvalidSetting {
					key: MAX_DEPTH_VAR.to_string(),
					value: raw.clone(),
				})?;
			settings.max_depth = Some(depth);
		}

		if let Some(raw) = lookup(LOG_VALUES_VAR) {
			settings.log_values = match raw.trim().to_lowercase().as_str() {
				"1" | "true" | "yes" | "on" => true,
				"0" | "false" | "no" | "off" | "" => false,
				_ => {
					return Err(SeedingError::InvalidSetting {
						key: LOG_VALUES_VAR.to_string(),
						value: raw,
					});
				}
			};
		}

		Ok(settings)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashMap;

	fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key| map.get(key).cloned()
	}

	#[rstest]
	fn test_defaults() {
		let settings = FactorySettings::new();
		assert_eq!(settings.max_depth, None);
		assert!(!settings.log_values);
	}

	#[rstest]
	fn test_builder() {
		let settings = FactorySettings::new()
			.with_max_depth(8)
			.with_log_values(true);
		assert_eq!(settings.max_depth, Some(8));
		assert!(settings.log_values);
	}

	#[rstest]
	fn test_from_json_partial() {
		let settings = FactorySettings::from_json(r#"{"max_depth": 4}"#).unwrap();
		assert_eq!(settings, FactorySettings::new().with_max_depth(4));
	}

	#[rstest]
	fn test_from_json_invalid() {
		let error = FactorySettings::from_json("{").unwrap_err();
		assert!(matches!(error, SeedingError::Json(_)));
	}

	#[rstest]
	fn test_from_json_rejects_zero_depth() {
		let error = FactorySettings::from_json(r#"{"max_depth": 0}"#).unwrap_err();
		assert_eq!(error.to_string(), "Invalid setting max_depth: 0");
	}

	#[rstest]
	fn test_from_vars() {
		let settings =
			FactorySettings::from_vars(vars(&[(MAX_DEPTH_VAR, " 16 "), (LOG_VALUES_VAR, "TRUE")]))
				.unwrap();
		assert_eq!(settings.max_depth, Some(16));
		assert!(settings.log_values);
	}

	#[rstest]
	fn test_from_vars_empty() {
		let settings = FactorySettings::from_vars(vars(&[])).unwrap();
		assert_eq!(settings, FactorySettings::default());
	}

	#[rstest]
	#[case(MAX_DEPTH_VAR, "deep")]
	#[case(MAX_DEPTH_VAR, "0")]
	#[case(MAX_DEPTH_VAR, "-1")]
	#[case(LOG_VALUES_VAR, "maybe")]
	fn test_from_vars_rejects_garbage(#[case] key: &str, #[case] value: &str) {
		let error = FactorySettings::from_vars(vars(&[(key, value)])).unwrap_err();
		assert_eq!(
			error.to_string(),
			format!("Invalid setting {}: {}", key, value)
		);
	}
}
