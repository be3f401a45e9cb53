//! Configuration module for hexsprite
//!
//! Provides types and parsing for `hexsprite.toml` conversion settings.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
