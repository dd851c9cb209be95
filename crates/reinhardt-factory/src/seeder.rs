//! Seeder: the registries plus materialization.
//!
//! A [`Seeder`] owns one [`SequenceRegistry`] and one [`FactoryRegistry`].
//! Test setup code creates one, defines sequences and factories on it, and
//! then asks it to `build` (in memory) or `create` (persisted) models.
//!
//! Blueprint generators receive the seeder itself, so defaults can pull
//! sequence values and related objects:
//!
//! ```
//! use reinhardt_factory::prelude::*;
//!
//! # fn main() -> SeedingResult<()> {
//! let mut seeder = Seeder::new();
//! seeder.define_sequence("person_email", |n| format!("person{}@example.com", n));
//! seeder.define_with::<Record, _>("user", |s| {
//!     Ok(attributes! {
//!         "name" => "Backbone User",
//!         "email" => s.next("person_email")?,
//!     })
//! })?;
//! seeder.define_with::<Record, _>("post", |s| {
//!     Ok(attributes! { "author" => Value::model(s.create::<Record>("user")?) })
//! })?;
//!
//! let post: Record = seeder.create("post")?;
//! let author = post.get("author").and_then(Value::as_model::<Record>).unwrap();
//! assert_eq!(author.get("email").and_then(Value::as_str), Some("person1@example.com"));
//! assert!(post.id().is_some());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{SeedingError, SeedingResult};
use crate::factory::{Factory, FactoryRegistry};
use crate::model::{AnyModel, Model};
use crate::sequence::{Sequence, SequenceRegistry};
use crate::settings::FactorySettings;
use crate::value::{Attributes, Value, attributes_to_json, merge_attributes};

/// Caller-supplied generator of override attributes.
pub type Overrides<'a> = &'a dyn Fn(&mut Seeder) -> SeedingResult<Attributes>;

/// How a model is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialize {
	/// In memory only, no identifier.
	Build,
	/// Constructed and persisted.
	Create,
}

impl fmt::Display for Materialize {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Build => f.write_str("build"),
			Self::Create => f.write_str("create"),
		}
	}
}

/// Registries for sequences and factories, and the entry point for
/// materializing models.
#[derive(Debug, Default)]
pub struct Seeder {
	sequences: SequenceRegistry,
	factories: FactoryRegistry,
	settings: FactorySettings,
	depth: usize,
}

impl Seeder {
	/// Creates a seeder with default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a seeder with custom settings.
	pub fn with_settings(settings: FactorySettings) -> Self {
		Self {
			settings,
			..Self::default()
		}
	}

	/// Returns the active settings.
	pub fn settings(&self) -> &FactorySettings {
		&self.settings
	}

	/// Returns the sequence registry.
	pub fn sequences(&self) -> &SequenceRegistry {
		&self.sequences
	}

	/// Returns the sequence registry mutably.
	pub fn sequences_mut(&mut self) -> &mut SequenceRegistry {
		&mut self.sequences
	}

	/// Returns the factory registry.
	pub fn factories(&self) -> &FactoryRegistry {
		&self.factories
	}

	// Sequences

	/// Registers (or replaces) a sequence with its counter at zero.
	pub fn define_sequence<F, V>(&mut self, name: impl Into<String>, generator: F) -> &Sequence
	where
		F: Fn(u64) -> V + Send + Sync + 'static,
		V: Into<Value>,
	{
		self.sequences.define_sequence(name, generator)
	}

	/// Advances a sequence and returns its value.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::UndefinedSequence`] for unknown names.
	pub fn next(&mut self, name: &str) -> SeedingResult<Value> {
		self.sequences.next(name)
	}

	/// Checks if a sequence is registered.
	pub fn has_sequence(&self, name: &str) -> bool {
		self.sequences.contains(name)
	}

	// Factories

	/// Registers a factory for `M` with no default attributes.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::InvalidFactoryName`] if `name` contains
	/// anything besides letters, digits and underscores.
	pub fn define<M: Model>(&mut self, name: impl Into<String>) -> SeedingResult<Arc<Factory>> {
		Ok(self.factories.register(Factory::new::<M>(name)?))
	}

	/// Registers a factory for `M` with a defaults generator.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::InvalidFactoryName`] for malformed names.
	pub fn define_with<M, F>(
		&mut self,
		name: impl Into<String>,
		defaults: F,
	) -> SeedingResult<Arc<Factory>>
	where
		M: Model,
		F: Fn(&mut Seeder) -> SeedingResult<Attributes> + Send + Sync + 'static,
	{
		Ok(self
			.factories
			.register(Factory::with_defaults::<M, F>(name, defaults)?))
	}

	/// Checks if a factory is registered.
	pub fn has_factory(&self, name: &str) -> bool {
		self.factories.has(name)
	}

	/// Returns all registered factory names.
	pub fn factory_names(&self) -> Vec<String> {
		self.factories.names()
	}

	/// Removes every sequence and factory.
	///
	/// Call between independent test scenarios to keep them isolated.
	pub fn reset(&mut self) {
		tracing::debug!(
			sequences = self.sequences.len(),
			factories = self.factories.len(),
			"resetting seeder"
		);
		self.sequences.clear();
		self.factories.clear();
	}

	// Materialization

	/// Builds a model in memory from the factory defaults.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::UndefinedFactory`] for unknown names,
	/// [`SeedingError::ModelMismatch`] if the factory builds a different type,
	/// and any error raised while evaluating defaults or constructing the model.
	pub fn build<M: Model>(&mut self, name: &str) -> SeedingResult<M> {
		self.materialize_as(name, None, Materialize::Build)
	}

	/// Builds a model in memory, merging overrides over the defaults.
	pub fn build_with<M, F>(&mut self, name: &str, overrides: F) -> SeedingResult<M>
	where
		M: Model,
		F: Fn(&mut Seeder) -> SeedingResult<Attributes>,
	{
		let overrides: Overrides<'_> = &overrides;
		self.materialize_as(name, Some(overrides), Materialize::Build)
	}

	/// Builds and persists a model.
	///
	/// The model's `persist` assigns its identifier.
	pub fn create<M: Model>(&mut self, name: &str) -> SeedingResult<M> {
		self.materialize_as(name, None, Materialize::Create)
	}

	/// Builds and persists a model, merging overrides over the defaults.
	pub fn create_with<M, F>(&mut self, name: &str, overrides: F) -> SeedingResult<M>
	where
		M: Model,
		F: Fn(&mut Seeder) -> SeedingResult<Attributes>,
	{
		let overrides: Overrides<'_> = &overrides;
		self.materialize_as(name, Some(overrides), Materialize::Create)
	}

	/// Builds `count` models.
	///
	/// Defaults are evaluated separately for every element.
	pub fn build_list<M: Model>(&mut self, name: &str, count: usize) -> SeedingResult<Vec<M>> {
		self.materialize_list(name, count, None, Materialize::Build)
	}

	/// Builds `count` models, applying the same overrides to each.
	///
	/// The overrides generator runs once per element.
	pub fn build_list_with<M, F>(
		&mut self,
		name: &str,
		count: usize,
		overrides: F,
	) -> SeedingResult<Vec<M>>
	where
		M: Model,
		F: Fn(&mut Seeder) -> SeedingResult<Attributes>,
	{
		let overrides: Overrides<'_> = &overrides;
		self.materialize_list(name, count, Some(overrides), Materialize::Build)
	}

	/// Creates `count` persisted models, each with its own identifier.
	pub fn create_list<M: Model>(&mut self, name: &str, count: usize) -> SeedingResult<Vec<M>> {
		self.materialize_list(name, count, None, Materialize::Create)
	}

	/// Creates `count` persisted models, applying the same overrides to each.
	pub fn create_list_with<M, F>(
		&mut self,
		name: &str,
		count: usize,
		overrides: F,
	) -> SeedingResult<Vec<M>>
	where
		M: Model,
		F: Fn(&mut Seeder) -> SeedingResult<Attributes>,
	{
		let overrides: Overrides<'_> = &overrides;
		self.materialize_list(name, count, Some(overrides), Materialize::Create)
	}

	/// Builds a model without naming its type.
	pub fn build_any(&mut self, name: &str) -> SeedingResult<Box<dyn AnyModel>> {
		self.materialize_any(name, None, Materialize::Build)
	}

	/// Creates a model without naming its type.
	pub fn create_any(&mut self, name: &str) -> SeedingResult<Box<dyn AnyModel>> {
		self.materialize_any(name, None, Materialize::Create)
	}

	/// Materializes a model through the named factory.
	pub fn materialize_any(
		&mut self,
		name: &str,
		overrides: Option<Overrides<'_>>,
		mode: Materialize,
	) -> SeedingResult<Box<dyn AnyModel>> {
		let factory = self.factories.require(name)?;
		self.run(&factory, overrides, mode)
	}

	fn materialize_as<M: Model>(
		&mut self,
		name: &str,
		overrides: Option<Overrides<'_>>,
		mode: Materialize,
	) -> SeedingResult<M> {
		let factory = self.typed_factory::<M>(name)?;
		self.run_as(&factory, overrides, mode)
	}

	fn materialize_list<M: Model>(
		&mut self,
		name: &str,
		count: usize,
		overrides: Option<Overrides<'_>>,
		mode: Materialize,
	) -> SeedingResult<Vec<M>> {
		// Checked up front so an unknown name fails even for an empty list
		self.typed_factory::<M>(name)?;
		tracing::trace!(factory = name, count, %mode, "materializing list");
		// Each element resolves the blueprint again, as a separate call would
		(0..count)
			.map(|_| self.materialize_as(name, overrides, mode))
			.collect()
	}

	fn typed_factory<M: Model>(&self, name: &str) -> SeedingResult<Arc<Factory>> {
		let factory = self.factories.require(name)?;
		if factory.builds::<M>() {
			Ok(factory)
		} else {
			Err(mismatch::<M>(&factory))
		}
	}

	fn run_as<M: Model>(
		&mut self,
		factory: &Factory,
		overrides: Option<Overrides<'_>>,
		mode: Materialize,
	) -> SeedingResult<M> {
		self.run(factory, overrides, mode)?
			.into_any()
			.downcast::<M>()
			.map(|model| *model)
			.map_err(|_| mismatch::<M>(factory))
	}

	fn run(
		&mut self,
		factory: &Factory,
		overrides: Option<Overrides<'_>>,
		mode: Materialize,
	) -> SeedingResult<Box<dyn AnyModel>> {
		if let Some(limit) = self.settings.max_depth {
			if self.depth >= limit {
				return Err(SeedingError::RecursionLimit {
					name: factory.name().to_string(),
					depth: limit,
				});
			}
		}

		self.depth += 1;
		let result = self.materialize(factory, overrides, mode);
		self.depth -= 1;
		result
	}

	fn materialize(
		&mut self,
		factory: &Factory,
		overrides: Option<Overrides<'_>>,
		mode: Materialize,
	) -> SeedingResult<Box<dyn AnyModel>> {
		let defaults = factory.defaults(self)?;
		let attributes = match overrides {
			Some(overrides) => merge_attributes(defaults, overrides(self)?),
			None => defaults,
		};

		if self.settings.log_values {
			tracing::trace!(
				factory = factory.name(),
				%mode,
				depth = self.depth,
				attributes = %attributes_to_json(&attributes),
				"materializing"
			);
		} else {
			tracing::trace!(factory = factory.name(), %mode, depth = self.depth, "materializing");
		}

		let mut model = factory.construct(attributes)?;
		if mode == Materialize::Create {
			model.persist_model()?;
		}
		Ok(model)
	}
}

fn mismatch<M: Model>(factory: &Factory) -> SeedingError {
	SeedingError::ModelMismatch {
		name: factory.name().to_string(),
		expected: std::any::type_name::<M>(),
		actual: factory.target_name(),
	}
}
