//! Store port - persistence abstraction

use crate::domain::result::Result;
use crate::domain::{Record, RecordPatch, Settings};

/// Persistence abstraction over the two local blobs: the record sequence
/// and the settings object
///
/// Implementations (adapters) provide the actual storage access. Records
/// are an ordered sequence in insertion order; every mutation rewrites the
/// whole collection.
pub trait RecordStore: Send + Sync {
    /// Get all records in insertion order
    ///
    /// Never fails: a read or parse failure degrades to an empty sequence.
    fn get_records(&self) -> Vec<Record>;

    /// Append a new record
    fn save_record(&self, record: &Record) -> Result<()>;

    /// Merge the provided fields into the record with the given id,
    /// refreshing its update timestamp
    ///
    /// Returns false when no record has that id.
    fn update_record(&self, id: &str, patch: &RecordPatch) -> Result<bool>;

    /// Delete the record with the given id; no-op when absent
    fn delete_record(&self, id: &str) -> Result<()>;

    /// Get the settings object, with defaults merged for missing keys
    ///
    /// Never fails: a read or parse failure degrades to the defaults.
    fn get_settings(&self) -> Settings;

    /// Persist the settings object
    fn save_settings(&self, settings: &Settings) -> Result<()>;
}
