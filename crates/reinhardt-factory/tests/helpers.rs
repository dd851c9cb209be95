//! Test helpers for reinhardt-factory integration tests.
//!
//! Provides example models, a preconfigured seeder fixture and a log
//! capture layer. Not every test binary uses every helper.

#![allow(dead_code)]

#[path = "helpers/models.rs"]
pub mod models;

#[path = "helpers/fixtures.rs"]
pub mod fixtures;

#[path = "helpers/logs.rs"]
pub mod logs;
