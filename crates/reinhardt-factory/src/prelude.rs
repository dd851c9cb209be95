//! Convenience re-exports for common usage.
//!
//! # Example
//!
//! ```ignore
//! use reinhardt_factory::prelude::*;
//!
//! // Now you have access to:
//! // - Seeder and settings
//! // - Model, Record and attribute values
//! // - Error types
//! ```

// Error types
pub use crate::error::{SeedingError, SeedingResult};

// Registries
pub use crate::factory::{Factory, FactoryRegistry};
pub use crate::seeder::{Materialize, Seeder};
pub use crate::sequence::{Sequence, SequenceRegistry, sequence};
pub use crate::settings::FactorySettings;

// Models and values
pub use crate::attributes;
pub use crate::model::{AnyModel, Model, Record};
pub use crate::value::{Attributes, Value};
