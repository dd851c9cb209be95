//! Schema-less attribute values.
//!
//! Blueprints describe their defaults as an [`Attributes`] mapping of
//! attribute name to [`Value`]. A value may embed another materialized model,
//! which is how a factory hands out related objects (e.g. a post's author).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::model::{AnyModel, Model};

/// Shared handle to a materialized model stored inside a [`Value`].
pub type ModelRef = Arc<dyn AnyModel>;

/// Attribute mapping used for defaults, overrides and model construction.
pub type Attributes = BTreeMap<String, Value>;

/// A single attribute value.
#[derive(Clone, Default)]
pub enum Value {
	/// Absent value.
	#[default]
	Null,
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Unsigned integer too large for [`Value::Int`].
	///
	/// Unsigned conversions produce `Int` whenever the value fits, so this
	/// variant only holds values above `i64::MAX`.
	UInt(u64),
	/// Floating point value.
	Float(f64),
	/// Text value.
	Text(String),
	/// Ordered list of values.
	List(Vec<Value>),
	/// Nested attribute mapping.
	Map(Attributes),
	/// Nested model produced by another factory.
	Model(ModelRef),
}

impl Value {
	/// Wraps a materialized model.
	///
	/// # Example
	///
	/// ```ignore
	/// let author: Record = seeder.create("user")?;
	/// let defaults = attributes! { "author" => Value::model(author) };
	/// ```
	pub fn model<M: Model>(model: M) -> Self {
		Self::Model(Arc::new(model))
	}

	/// Returns true for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Returns the text if this is a [`Value::Text`].
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the integer if this is a [`Value::Int`].
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Int(value) => Some(*value),
			_ => None,
		}
	}

	/// Returns the value as `u64` if it is a non-negative integer.
	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Self::Int(value) => u64::try_from(*value).ok(),
			Self::UInt(value) => Some(*value),
			_ => None,
		}
	}

	/// Returns a float, widening integers.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Float(value) => Some(*value),
			Self::Int(value) => Some(*value as f64),
			Self::UInt(value) => Some(*value as f64),
			_ => None,
		}
	}

	/// Returns the boolean if this is a [`Value::Bool`].
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// Returns the nested mapping if this is a [`Value::Map`].
	pub fn as_map(&self) -> Option<&Attributes> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Downcasts an embedded model to a concrete type.
	///
	/// Returns `None` when the value is not a model or the model is of a
	/// different type.
	pub fn as_model<M: Model>(&self) -> Option<&M> {
		match self {
			Self::Model(model) => model.as_any().downcast_ref::<M>(),
			_ => None,
		}
	}

	/// Renders the value as JSON.
	///
	/// Models render as their attributes, plus an `id` entry once persisted.
	/// Non-finite floats become `null`.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Self::Null => serde_json::Value::Null,
			Self::Bool(value) => serde_json::Value::Bool(*value),
			Self::Int(value) => serde_json::Value::from(*value),
			Self::UInt(value) => serde_json::Value::from(*value),
			Self::Float(value) => serde_json::Number::from_f64(*value)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
			Self::Text(text) => serde_json::Value::String(text.clone()),
			Self::List(items) => {
				serde_json::Value::Array(items.iter().map(Value::to_json).collect())
			}
			Self::Map(map) => attributes_to_json(map),
			Self::Model(model) => {
				let mut json = attributes_to_json(model.model_attributes());
				if let (serde_json::Value::Object(object), Some(id)) =
					(&mut json, model.model_id())
				{
					object.insert("id".to_string(), serde_json::Value::from(id));
				}
				json
			}
		}
	}
}

/// Renders an attribute mapping as a JSON object.
pub fn attributes_to_json(attributes: &Attributes) -> serde_json::Value {
	serde_json::Value::Object(
		attributes
			.iter()
			.map(|(key, value)| (key.clone(), value.to_json()))
			.collect(),
	)
}

/// Merges `overrides` over `defaults`.
///
/// Keys present in both take the override's value, keys present in only one
/// side are kept as-is.
pub fn merge_attributes(mut defaults: Attributes, overrides: Attributes) -> Attributes {
	defaults.extend(overrides);
	defaults
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("Null"),
			Self::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
			Self::Int(value) => f.debug_tuple("Int").field(value).finish(),
			Self::UInt(value) => f.debug_tuple("UInt").field(value).finish(),
			Self::Float(value) => f.debug_tuple("Float").field(value).finish(),
			Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
			Self::List(items) => f.debug_tuple("List").field(items).finish(),
			Self::Map(map) => f.debug_tuple("Map").field(map).finish(),
			Self::Model(model) => f
				.debug_struct("Model")
				.field("type", &model.model_type())
				.field("id", &model.model_id())
				.finish(),
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::UInt(a), Self::UInt(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a == b,
			(Self::Text(a), Self::Text(b)) => a == b,
			(Self::List(a), Self::List(b)) => a == b,
			(Self::Map(a), Self::Map(b)) => a == b,
			// Models compare by identity
			(Self::Model(a), Self::Model(b)) => Arc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.to_json().serialize(serializer)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&String> for Value {
	fn from(value: &String) -> Self {
		Self::Text(value.clone())
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

macro_rules! impl_from_signed {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::Int(i64::from(value))
				}
			}
		)*
	};
}

macro_rules! impl_from_unsigned {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					let value = value as u64;
					i64::try_from(value)
						.map(Self::Int)
						.unwrap_or(Self::UInt(value))
				}
			}
		)*
	};
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(values: Vec<T>) -> Self {
		Self::List(values.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Self::Null)
	}
}

impl From<Attributes> for Value {
	fn from(map: Attributes) -> Self {
		Self::Map(map)
	}
}

impl From<ModelRef> for Value {
	fn from(model: ModelRef) -> Self {
		Self::Model(model)
	}
}

impl From<serde_json::Value> for Value {
	fn from(json: serde_json::Value) -> Self {
		match json {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(value) => Self::Bool(value),
			serde_json::Value::Number(number) => {
				if let Some(value) = number.as_i64() {
					Self::Int(value)
				} else if let Some(value) = number.as_u64() {
					Self::UInt(value)
				} else {
					Self::Float(number.as_f64().unwrap_or(f64::NAN))
				}
			}
			serde_json::Value::String(text) => Self::Text(text),
			serde_json::Value::Array(items) => {
				Self::List(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(object) => Self::Map(
				object
					.into_iter()
					.map(|(key, value)| (key, Value::from(value)))
					.collect(),
			),
		}
	}
}

/// Builds an [`Attributes`] mapping.
///
/// # Example
///
/// ```
/// use reinhardt_factory::attributes;
///
/// let defaults = attributes! {
///     "name" => "Backbone User",
///     "age" => 30,
/// };
/// assert_eq!(defaults["name"].as_str(), Some("Backbone User"));
/// ```
#[macro_export]
macro_rules! attributes {
	() => {
		$crate::Attributes::new()
	};
	($($key:expr => $value:expr),+ $(,)?) => {{
		let mut attributes = $crate::Attributes::new();
		$(
			attributes.insert(::std::string::String::from($key), $crate::Value::from($value));
		)+
		attributes
	}};
}
