//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts, where clients create the entity
//! - Conversions into the `studio_core` domain types where one exists

pub mod asset;
pub mod course;
pub mod group_configuration;
pub mod video;
