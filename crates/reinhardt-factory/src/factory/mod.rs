//! Factory blueprints and their registry.

mod blueprint;
mod registry;

pub use blueprint::{DefaultsGenerator, Factory, validate_factory_name};
pub use registry::FactoryRegistry;
