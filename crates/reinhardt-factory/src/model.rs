//! Model contract used by factories.
//!
//! Factories do not know how a model stores its data. They only need to
//! construct it from an [`Attributes`] mapping and, for `create`, ask it to
//! persist itself. Persisting assigns an identifier.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::error::SeedingResult;
use crate::value::{Attributes, Value};

/// A type factories can materialize.
///
/// # Example
///
/// ```
/// use reinhardt_factory::{Attributes, Model, SeedingError, SeedingResult, next_record_id};
///
/// #[derive(Debug)]
/// struct Tag {
///     attributes: Attributes,
///     id: Option<u64>,
/// }
///
/// impl Model for Tag {
///     fn from_attributes(attributes: Attributes) -> SeedingResult<Self> {
///         if !attributes.contains_key("label") {
///             return Err(SeedingError::invalid_attribute("label", "missing"));
///         }
///         Ok(Self { attributes, id: None })
///     }
///
///     fn attributes(&self) -> &Attributes {
///         &self.attributes
///     }
///
///     fn id(&self) -> Option<u64> {
///         self.id
///     }
///
///     fn persist(&mut self) -> SeedingResult<()> {
///         self.id.get_or_insert_with(next_record_id);
///         Ok(())
///     }
/// }
/// ```
pub trait Model: Any + fmt::Debug + Send + Sync {
	/// Constructs the model from merged attributes.
	fn from_attributes(attributes: Attributes) -> SeedingResult<Self>
	where
		Self: Sized;

	/// Returns the attributes the model was constructed with.
	fn attributes(&self) -> &Attributes;

	/// Reads a single attribute.
	fn get(&self, key: &str) -> Option<&Value> {
		self.attributes().get(key)
	}

	/// Returns the identifier, or `None` if the model was never persisted.
	fn id(&self) -> Option<u64>;

	/// Persists the model, assigning an identifier.
	///
	/// Identifiers must increase strictly across calls.
	fn persist(&mut self) -> SeedingResult<()>;
}

/// Type-erased model wrapper.
///
/// Every [`Model`] implements this trait, which lets registries hold
/// blueprints for different model types side by side.
pub trait AnyModel: Send + Sync + fmt::Debug {
	/// Returns the concrete type name.
	fn model_type(&self) -> &'static str;

	/// Returns the model attributes.
	fn model_attributes(&self) -> &Attributes;

	/// Returns the model identifier.
	fn model_id(&self) -> Option<u64>;

	/// Persists the model.
	fn persist_model(&mut self) -> SeedingResult<()>;

	/// Returns the model as an Any reference for downcasting.
	fn as_any(&self) -> &dyn Any;

	/// Converts the boxed model for owned downcasting.
	fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<M: Model> AnyModel for M {
	fn model_type(&self) -> &'static str {
		std::any::type_name::<M>()
	}

	fn model_attributes(&self) -> &Attributes {
		self.attributes()
	}

	fn model_id(&self) -> Option<u64> {
		self.id()
	}

	fn persist_model(&mut self) -> SeedingResult<()> {
		self.persist()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn into_any(self: Box<Self>) -> Box<dyn Any> {
		self
	}
}

static NEXT_RECORD_ID: AtomicU64 = AtomicU64::new(1);

/// Allocates the next process-wide record identifier.
///
/// The first identifier handed out is 1. Custom [`Model`] implementations can
/// use this to share the identifier space with [`Record`].
pub fn next_record_id() -> u64 {
	NEXT_RECORD_ID.fetch_add(1, Ordering::Relaxed)
}

/// Schema-less model backed by an attribute map.
///
/// Useful when a test only cares about attribute values, or as the storage
/// inside a typed wrapper model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
	#[serde(skip_serializing_if = "Option::is_none")]
	id: Option<u64>,
	#[serde(flatten)]
	attributes: Attributes,
}

impl Record {
	/// Creates an unpersisted record.
	pub fn new(attributes: Attributes) -> Self {
		Self {
			id: None,
			attributes,
		}
	}

	/// Sets an attribute, returning the previous value.
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.attributes.insert(key.into(), value.into())
	}

	/// Returns true once the record has been persisted.
	pub fn is_persisted(&self) -> bool {
		self.id.is_some()
	}
}

impl Model for Record {
	fn from_attributes(attributes: Attributes) -> SeedingResult<Self> {
		Ok(Self::new(attributes))
	}

	fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	fn id(&self) -> Option<u64> {
		self.id
	}

	fn persist(&mut self) -> SeedingResult<()> {
		// Saving twice keeps the original identifier
		let id = *self.id.get_or_insert_with(next_record_id);
		tracing::trace!(id, "persisted record");
		Ok(())
	}
}
