//! Error types for the factory module.
//!
//! The message text of the registry errors is fixed: test suites assert on
//! it, so it must not drift between releases.

use thiserror::Error;

/// Errors that can occur while defining or materializing factories.
#[derive(Debug, Error)]
pub enum SeedingError {
	/// Factory name contains characters outside `[A-Za-z0-9_]`.
	#[error("Factory name should not contain spaces or other funky characters")]
	InvalidFactoryName(String),

	/// No blueprint is registered under the requested name.
	#[error("Factory with name {0} does not exist")]
	UndefinedFactory(String),

	/// No sequence is registered under the requested name.
	#[error("Sequence with name {0} does not exist")]
	UndefinedSequence(String),

	/// The blueprint builds a different model type than the caller asked for.
	#[error("Factory {name} builds {actual}, not {expected}")]
	ModelMismatch {
		/// Factory name.
		name: String,
		/// Type requested by the caller.
		expected: &'static str,
		/// Type the blueprint was defined with.
		actual: &'static str,
	},

	/// A model rejected an attribute while being constructed.
	#[error("Invalid attribute: {field}: {message}")]
	InvalidAttribute {
		/// Attribute that was rejected.
		field: String,
		/// Reason given by the model.
		message: String,
	},

	/// The model failed to persist itself.
	#[error("Persistence error: {0}")]
	PersistenceError(String),

	/// Nested factory calls went deeper than the configured limit.
	#[error("Factory {name} exceeded the maximum nesting depth of {depth}")]
	RecursionLimit {
		/// Factory whose materialization crossed the limit.
		name: String,
		/// Configured limit.
		depth: usize,
	},

	/// A setting could not be parsed.
	#[error("Invalid setting {key}: {value}")]
	InvalidSetting {
		/// Setting name.
		key: String,
		/// Raw value that was rejected.
		value: String,
	},

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl SeedingError {
	/// Shorthand for [`SeedingError::InvalidAttribute`].
	pub fn invalid_attribute(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidAttribute {
			field: field.into(),
			message: message.into(),
		}
	}
}

/// Result type alias for factory operations.
pub type SeedingResult<T> = Result<T, SeedingError>;
