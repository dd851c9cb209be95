//! Test data factories for the Reinhardt framework.
//!
//! This crate provides Factory Boy style helpers for test setup code:
//!
//! - **Sequences**: named counters turned into unique values (emails, codes)
//! - **Factories**: named blueprints producing models from default attributes
//! - **Build / Create**: materialize models in memory, or persisted with an id
//! - **Lists**: materialize many models at once, each evaluated independently
//!
//! # Quick Start
//!
//! ```
//! use reinhardt_factory::prelude::*;
//!
//! # fn main() -> SeedingResult<()> {
//! let mut seeder = Seeder::new();
//!
//! seeder.define_sequence("email", |n| format!("person{}@example.com", n));
//! assert_eq!(seeder.next("email")?.as_str(), Some("person1@example.com"));
//! assert_eq!(seeder.next("email")?.as_str(), Some("person2@example.com"));
//!
//! seeder.define_with::<Record, _>("user", |s| {
//!     Ok(attributes! {
//!         "name" => "Backbone User",
//!         "email" => s.next("email")?,
//!     })
//! })?;
//!
//! let built: Record = seeder.build("user")?;                 // In-memory instance
//! let created: Record = seeder.create("user")?;              // Persisted, has an id
//! let batch: Vec<Record> = seeder.create_list("user", 10)?;  // Create multiple
//!
//! assert!(built.id().is_none());
//! assert!(created.id().is_some());
//! assert_eq!(batch.len(), 10);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`Seeder`] - owns the registries and materializes models
//! - [`SequenceRegistry`] / [`Sequence`] - auto-incrementing values
//! - [`FactoryRegistry`] / [`Factory`] - blueprints keyed by name
//! - [`Model`] - what a factory produces; [`Record`] is a schema-less model
//! - [`Value`] / [`Attributes`] - schema-less attribute mappings
//! - [`FactorySettings`] - nesting limits and logging options
//!
//! Nothing is global: every [`Seeder`] is independent, so tests can create
//! their own or call [`Seeder::reset`] between scenarios. The only
//! process-wide state is the identifier counter behind [`Record`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod factory;
pub mod model;
pub mod prelude;
pub mod seeder;
pub mod sequence;
pub mod settings;
pub mod value;

// Re-export commonly used types at crate root
pub use error::{SeedingError, SeedingResult};
pub use factory::{Factory, FactoryRegistry};
pub use model::{AnyModel, Model, Record, next_record_id};
pub use seeder::{Materialize, Overrides, Seeder};
pub use sequence::{Sequence, SequenceRegistry, sequence};
pub use settings::FactorySettings;
pub use value::{Attributes, ModelRef, Value, merge_attributes};
