//! Example models used by the integration tests.

use reinhardt_factory::prelude::*;
use reinhardt_factory::next_record_id;

/// A user with a name and an email.
#[derive(Debug, Clone)]
pub struct User {
	attributes: Attributes,
	id: Option<u64>,
}

impl User {
	pub fn name(&self) -> Option<&str> {
		self.get("name").and_then(Value::as_str)
	}

	pub fn email(&self) -> Option<&str> {
		self.get("email").and_then(Value::as_str)
	}
}

impl Model for User {
	fn from_attributes(attributes: Attributes) -> SeedingResult<Self> {
		if let Some(email) = attributes.get("email") {
			if email.as_str().is_none() && !email.is_null() {
				return Err(SeedingError::invalid_attribute("email", "expected text"));
			}
		}
		Ok(Self {
			attributes,
			id: None,
		})
	}

	fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	fn id(&self) -> Option<u64> {
		self.id
	}

	fn persist(&mut self) -> SeedingResult<()> {
		self.id.get_or_insert_with(next_record_id);
		Ok(())
	}
}

/// A post with a title and an author.
///
/// Like a model with declared defaults, a post without a title gets
/// "Default Title".
#[derive(Debug, Clone)]
pub struct Post {
	attributes: Attributes,
	id: Option<u64>,
}

impl Post {
	pub fn title(&self) -> Option<&str> {
		self.get("title").and_then(Value::as_str)
	}

	pub fn author(&self) -> Option<&User> {
		self.get("author").and_then(Value::as_model::<User>)
	}
}

impl Model for Post {
	fn from_attributes(mut attributes: Attributes) -> SeedingResult<Self> {
		attributes
			.entry("title".to_string())
			.or_insert_with(|| Value::from("Default Title"));
		Ok(Self {
			attributes,
			id: None,
		})
	}

	fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	fn id(&self) -> Option<u64> {
		self.id
	}

	fn persist(&mut self) -> SeedingResult<()> {
		self.id.get_or_insert_with(next_record_id);
		Ok(())
	}
}

/// A model whose storage always fails.
#[derive(Debug)]
pub struct Unsavable {
	attributes: Attributes,
}

impl Model for Unsavable {
	fn from_attributes(attributes: Attributes) -> SeedingResult<Self> {
		Ok(Self { attributes })
	}

	fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	fn id(&self) -> Option<u64> {
		None
	}

	fn persist(&mut self) -> SeedingResult<()> {
		Err(SeedingError::PersistenceError("read-only store".to_string()))
	}
}
