//! Named monotonic sequences.
//!
//! A sequence pairs a counter with a generator. Every call to
//! [`SequenceRegistry::next`] advances the counter by one and feeds it to the
//! generator, so the first value produced is `generator(1)`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{SeedingError, SeedingResult};
use crate::value::Value;

/// Generator turning a counter into a value.
pub type SequenceGenerator = Arc<dyn Fn(u64) -> Value + Send + Sync>;

/// A named counter with its value generator.
#[derive(Clone)]
pub struct Sequence {
	name: String,
	counter: u64,
	generator: SequenceGenerator,
}

impl Sequence {
	/// Creates a sequence with its counter at zero.
	pub fn new<F, V>(name: impl Into<String>, generator: F) -> Self
	where
		F: Fn(u64) -> V + Send + Sync + 'static,
		V: Into<Value>,
	{
		Self {
			name: name.into(),
			counter: 0,
			generator: Arc::new(move |n: u64| -> Value { generator(n).into() }),
		}
	}

	/// Returns the sequence name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns how many values have been produced so far.
	pub fn current(&self) -> u64 {
		self.counter
	}

	/// Advances the counter and returns the generated value.
	pub fn next_value(&mut self) -> Value {
		self.counter += 1;
		(self.generator)(self.counter)
	}

	/// Puts the counter back to zero.
	pub fn reset(&mut self) {
		self.counter = 0;
	}
}

impl fmt::Debug for Sequence {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Sequence")
			.field("name", &self.name)
			.field("counter", &self.counter)
			.finish_non_exhaustive()
	}
}

/// Creates a sequence that formats its counter into a template.
///
/// Every `{n}` in the template is replaced by the counter.
///
/// # Example
///
/// ```
/// use reinhardt_factory::sequence;
///
/// let mut emails = sequence("email", "person{n}@example.com");
/// assert_eq!(emails.next_value().as_str(), Some("person1@example.com"));
/// ```
pub fn sequence(name: impl Into<String>, template: impl Into<String>) -> Sequence {
	let template = template.into();
	Sequence::new(name, move |n| template.replace("{n}", &n.to_string()))
}

/// Registry of named sequences.
#[derive(Debug, Default, Clone)]
pub struct SequenceRegistry {
	sequences: HashMap<String, Sequence>,
}

impl SequenceRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a sequence, replacing any sequence with the same name.
	///
	/// The counter always starts at zero, including on redefinition.
	pub fn define_sequence<F, V>(&mut self, name: impl Into<String>, generator: F) -> &Sequence
	where
		F: Fn(u64) -> V + Send + Sync + 'static,
		V: Into<Value>,
	{
		self.insert(Sequence::new(name, generator))
	}

	/// Registers an already constructed sequence.
	pub fn insert(&mut self, sequence: Sequence) -> &Sequence {
		let name = sequence.name.clone();
		if self.sequences.contains_key(&name) {
			tracing::warn!(sequence = %name, "redefining sequence");
		} else {
			tracing::debug!(sequence = %name, "defined sequence");
		}
		self.sequences.insert(name.clone(), sequence);
		&self.sequences[&name]
	}

	/// Advances the named sequence and returns its next value.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::UndefinedSequence`] if no sequence is
	/// registered under `name`.
	pub fn next(&mut self, name: &str) -> SeedingResult<Value> {
		let sequence = self
			.sequences
			.get_mut(name)
			.ok_or_else(|| SeedingError::UndefinedSequence(name.to_string()))?;
		let value = sequence.next_value();
		tracing::trace!(sequence = %name, counter = sequence.counter, "advanced sequence");
		Ok(value)
	}

	/// Returns the counter of the named sequence without advancing it.
	pub fn current(&self, name: &str) -> Option<u64> {
		self.sequences.get(name).map(Sequence::current)
	}

	/// Resets the named sequence to zero.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::UndefinedSequence`] if the sequence is missing.
	pub fn reset(&mut self, name: &str) -> SeedingResult<()> {
		self.sequences
			.get_mut(name)
			.map(Sequence::reset)
			.ok_or_else(|| SeedingError::UndefinedSequence(name.to_string()))
	}

	/// Checks if a sequence is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.sequences.contains_key(name)
	}

	/// Returns all registered sequence names.
	pub fn names(&self) -> Vec<String> {
		self.sequences.keys().cloned().collect()
	}

	/// Returns the number of registered sequences.
	pub fn len(&self) -> usize {
		self.sequences.len()
	}

	/// Returns true if no sequences are registered.
	pub fn is_empty(&self) -> bool {
		self.sequences.is_empty()
	}

	/// Removes every sequence.
	pub fn clear(&mut self) {
		self.sequences.clear();
	}
}
