//! JSON file store - the two-blob local persistence adapter
//!
//! Records live in records.json (a JSON array, insertion order preserved)
//! and settings in settings.json (a JSON object merged over defaults on
//! load). Every mutation reads the whole collection and rewrites it in
//! full; there is no partial update and no cross-process locking, so two
//! concurrent writers are last-one-wins.

use std::path::{Path, PathBuf};

use crate::domain::result::Result;
use crate::domain::{Record, RecordPatch, Settings};
use crate::ports::RecordStore;

/// File-backed record store rooted in a data directory
pub struct JsonFileStore {
    records_path: PathBuf,
    settings_path: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given directory, creating it if needed
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            records_path: data_dir.join("records.json"),
            settings_path: data_dir.join("settings.json"),
        })
    }

    fn read_records(&self) -> Vec<Record> {
        let content = match std::fs::read_to_string(&self.records_path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        // A blob that fails to parse degrades to empty rather than failing
        // the read
        serde_json::from_str(&content).unwrap_or_default()
    }

    fn write_records(&self, records: &[Record]) -> Result<()> {
        let content = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.records_path, content)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn get_records(&self) -> Vec<Record> {
        self.read_records()
    }

    fn save_record(&self, record: &Record) -> Result<()> {
        let mut records = self.read_records();
        records.push(record.clone());
        self.write_records(&records)
    }

    fn update_record(&self, id: &str, patch: &RecordPatch) -> Result<bool> {
        let mut records = self.read_records();
        match records.iter_mut().find(|r| r.id == id) {
            Some(existing) => {
                *existing = existing.merged(patch);
                self.write_records(&records)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_record(&self, id: &str) -> Result<()> {
        let mut records = self.read_records();
        records.retain(|r| r.id != id);
        self.write_records(&records)
    }

    fn get_settings(&self) -> Settings {
        let content = match std::fs::read_to_string(&self.settings_path) {
            Ok(content) => content,
            Err(_) => return Settings::default(),
        };
        // Missing keys merge their defaults through serde; a blob that is
        // not an object at all degrades to the full defaults
        serde_json::from_str(&content).unwrap_or_default()
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        let content = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }
}
