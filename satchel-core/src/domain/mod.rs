//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with field-level validation rules - no I/O or external dependencies.

pub mod record;
pub mod result;
mod settings;

pub use record::{Record, RecordPatch, INCOME_CATEGORY};
pub use settings::{Currency, Settings, Theme};
