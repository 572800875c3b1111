//! Configuration helpers shared across the specification models.

mod helpers;

pub use helpers::{deserialize_duration_from_seconds, serialize_duration_to_seconds};
