//! Factory blueprints.
//!
//! A blueprint ties a factory name to the model type it produces and to the
//! generator of its default attributes.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{SeedingError, SeedingResult};
use crate::model::{AnyModel, Model};
use crate::seeder::Seeder;
use crate::value::Attributes;

/// Generator of a blueprint's default attributes.
///
/// Receives the seeder so it can pull sequence values or materialize related
/// objects through other factories.
pub type DefaultsGenerator = Arc<dyn Fn(&mut Seeder) -> SeedingResult<Attributes> + Send + Sync>;

type Constructor = fn(Attributes) -> SeedingResult<Box<dyn AnyModel>>;

// Letters, digits and underscores only.
static FACTORY_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^[A-Za-z0-9_]+$").expect("FACTORY_NAME_REGEX: invalid regex pattern")
});

/// Checks that `name` is a valid factory name.
///
/// # Errors
///
/// Returns [`SeedingError::InvalidFactoryName`] if the name is empty or
/// contains anything besides ASCII letters, digits and underscores.
pub fn validate_factory_name(name: &str) -> SeedingResult<()> {
	if FACTORY_NAME_REGEX.is_match(name) {
		Ok(())
	} else {
		Err(SeedingError::InvalidFactoryName(name.to_string()))
	}
}

fn construct<M: Model>(attributes: Attributes) -> SeedingResult<Box<dyn AnyModel>> {
	Ok(Box::new(M::from_attributes(attributes)?))
}

/// A named blueprint for materializing models.
#[derive(Clone)]
pub struct Factory {
	name: String,
	target: TypeId,
	target_name: &'static str,
	constructor: Constructor,
	defaults: DefaultsGenerator,
}

impl Factory {
	/// Creates a blueprint with no default attributes.
	pub fn new<M: Model>(name: impl Into<String>) -> SeedingResult<Self> {
		Self::with_defaults::<M, _>(name, |_| Ok(Attributes::new()))
	}

	/// Creates a blueprint with a defaults generator.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::InvalidFactoryName`] for malformed names.
	pub fn with_defaults<M, F>(name: impl Into<String>, defaults: F) -> SeedingResult<Self>
	where
		M: Model,
		F: Fn(&mut Seeder) -> SeedingResult<Attributes> + Send + Sync + 'static,
	{
		let name = name.into();
		validate_factory_name(&name)?;
		Ok(Self {
			name,
			target: TypeId::of::<M>(),
			target_name: std::any::type_name::<M>(),
			constructor: construct::<M>,
			defaults: Arc::new(defaults),
		})
	}

	/// Returns the factory name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the type name of the model this factory builds.
	pub fn target_name(&self) -> &'static str {
		self.target_name
	}

	/// Returns true if this factory builds `M`.
	pub fn builds<M: Model>(&self) -> bool {
		self.target == TypeId::of::<M>()
	}

	/// Evaluates the default attributes.
	pub fn defaults(&self, seeder: &mut Seeder) -> SeedingResult<Attributes> {
		(self.defaults)(seeder)
	}

	/// Constructs the target model from merged attributes.
	pub fn construct(&self, attributes: Attributes) -> SeedingResult<Box<dyn AnyModel>> {
		(self.constructor)(attributes)
	}
}

impl fmt::Debug for Factory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Factory")
			.field("name", &self.name)
			.field("target", &self.target_name)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::attributes;
	use crate::model::Record;
	use crate::value::Value;
	use rstest::rstest;

	#[rstest]
	#[case("user")]
	#[case("User_2")]
	#[case("_private")]
	#[case("42")]
	fn test_valid_names(#[case] name: &str) {
		assert!(validate_factory_name(name).is_ok());
	}

	#[rstest]
	#[case("wrong name")]
	#[case("")]
	#[case("dash-name")]
	#[case("auth.User")]
	#[case("naïve")]
	#[case("trailing\n")]
	fn test_invalid_names(#[case] name: &str) {
		let error = validate_factory_name(name).unwrap_err();
		assert_eq!(
			error.to_string(),
			"Factory name should not contain spaces or other funky characters"
		);
	}

	#[rstest]
	fn test_blueprint_records_target() {
		let factory = Factory::new::<Record>("record").unwrap();

		assert_eq!(factory.name(), "record");
		assert!(factory.builds::<Record>());
		assert!(factory.target_name().ends_with("Record"));
	}

	#[rstest]
	fn test_blueprint_defaults_and_construct() {
		let factory = Factory::with_defaults::<Record, _>("post", |_| {
			Ok(attributes! { "title" => "Default Title" })
		})
		.unwrap();
		let mut seeder = Seeder::new();

		let defaults = factory.defaults(&mut seeder).unwrap();
		let model = factory.construct(defaults).unwrap();

		assert_eq!(
			model.model_attributes().get("title"),
			Some(&Value::from("Default Title"))
		);
		assert_eq!(model.model_id(), None);
	}
}
