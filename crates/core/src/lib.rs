//! Domain logic for the course-authoring studio.
//!
//! Everything in this crate is free of I/O: payload parsing and
//! normalization for group configurations, the per-course registry
//! aggregate, the handout slot state machine, and the bounded polling
//! helper used by clients waiting on asynchronous state.

pub mod course;
pub mod error;
pub mod group_configuration;
pub mod handout;
pub mod polling;
pub mod registry;
pub mod types;
