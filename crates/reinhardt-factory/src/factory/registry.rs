//! Factory registry for lookup by name.
//!
//! The registry only stores blueprints. Materialization goes through
//! [`Seeder`](crate::Seeder), which owns a registry alongside the sequences
//! blueprints draw from.

use std::collections::HashMap;
use std::sync::Arc;

use super::blueprint::Factory;
use crate::error::{SeedingError, SeedingResult};

/// Registry of factory blueprints keyed by name.
#[derive(Debug, Default, Clone)]
pub struct FactoryRegistry {
	factories: HashMap<String, Arc<Factory>>,
}

impl FactoryRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a blueprint, replacing any blueprint with the same name.
	///
	/// # Example
	///
	/// ```ignore
	/// registry.register(Factory::new::<Record>("user")?);
	/// ```
	pub fn register(&mut self, factory: Factory) -> Arc<Factory> {
		let factory = Arc::new(factory);
		let name = factory.name().to_string();
		if let Some(previous) = self.factories.insert(name.clone(), Arc::clone(&factory)) {
			tracing::warn!(
				factory = %name,
				previous = previous.target_name(),
				target = factory.target_name(),
				"redefining factory"
			);
		} else {
			tracing::debug!(factory = %name, target = factory.target_name(), "defined factory");
		}
		factory
	}

	/// Gets a blueprint by name.
	pub fn get(&self, name: &str) -> Option<Arc<Factory>> {
		self.factories.get(name).cloned()
	}

	/// Gets a blueprint by name, failing if it is not registered.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::UndefinedFactory`].
	pub fn require(&self, name: &str) -> SeedingResult<Arc<Factory>> {
		self.get(name)
			.ok_or_else(|| SeedingError::UndefinedFactory(name.to_string()))
	}

	/// Checks if a blueprint is registered.
	pub fn has(&self, name: &str) -> bool {
		self.factories.contains_key(name)
	}

	/// Removes a blueprint, returning it if it was registered.
	pub fn remove(&mut self, name: &str) -> Option<Arc<Factory>> {
		self.factories.remove(name)
	}

	/// Returns all registered factory names.
	pub fn names(&self) -> Vec<String> {
		self.factories.keys().cloned().collect()
	}

	/// Returns the number of registered blueprints.
	pub fn len(&self) -> usize {
		self.factories.len()
	}

	/// Returns true if no blueprints are registered.
	pub fn is_empty(&self) -> bool {
		self.factories.is_empty()
	}

	/// Clears all blueprints.
	pub fn clear(&mut self) {
		self.factories.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::Record;
	use rstest::rstest;

	#[derive(Debug)]
	struct Other;

	impl crate::Model for Other {
		fn from_attributes(_: crate::Attributes) -> SeedingResult<Self> {
			Ok(Self)
		}

		fn attributes(&self) -> &crate::Attributes {
			static EMPTY: crate::Attributes = crate::Attributes::new();
			&EMPTY
		}

		fn id(&self) -> Option<u64> {
			None
		}

		fn persist(&mut self) -> SeedingResult<()> {
			Ok(())
		}
	}

	#[rstest]
	fn test_register_and_get_factory() {
		let mut registry = FactoryRegistry::new();

		registry.register(Factory::new::<Record>("user").unwrap());

		assert!(registry.has("user"));
		assert!(!registry.has("post"));
		assert_eq!(registry.get("user").unwrap().name(), "user");
	}

	#[rstest]
	fn test_require_missing() {
		let registry = FactoryRegistry::new();

		let error = registry.require("undefined_factory").unwrap_err();

		assert_eq!(
			error.to_string(),
			"Factory with name undefined_factory does not exist"
		);
	}

	#[rstest]
	fn test_register_replaces() {
		let mut registry = FactoryRegistry::new();
		registry.register(Factory::new::<Record>("thing").unwrap());

		registry.register(Factory::new::<Other>("thing").unwrap());

		assert_eq!(registry.len(), 1);
		assert!(registry.get("thing").unwrap().builds::<Other>());
	}

	#[rstest]
	fn test_names() {
		let mut registry = FactoryRegistry::new();
		registry.register(Factory::new::<Record>("user").unwrap());
		registry.register(Factory::new::<Record>("post").unwrap());

		let mut names = registry.names();
		names.sort();
		assert_eq!(names, vec!["post".to_string(), "user".to_string()]);
	}

	#[rstest]
	fn test_remove_and_clear() {
		let mut registry = FactoryRegistry::new();
		assert!(registry.is_empty());
		registry.register(Factory::new::<Record>("user").unwrap());
		registry.register(Factory::new::<Record>("post").unwrap());

		assert!(registry.remove("user").is_some());
		assert!(registry.remove("user").is_none());
		assert_eq!(registry.len(), 1);

		registry.clear();
		assert!(registry.is_empty());
	}
}
