//! In-memory adapters for tests and embedding
//!
//! `MemoryStore` keeps both blobs behind mutexes with the same semantics
//! as the file-backed store; `CollectingNotifier` records everything it is
//! asked to deliver so tests can assert on advisory traffic.

use std::sync::Mutex;

use crate::domain::result::Result;
use crate::domain::{Record, RecordPatch, Settings};
use crate::ports::{Notifier, RecordStore, Severity};

/// Record store held entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Record>>,
    settings: Mutex<Settings>,
}

impl RecordStore for MemoryStore {
    fn get_records(&self) -> Vec<Record> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn save_record(&self, record: &Record) -> Result<()> {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
        Ok(())
    }

    fn update_record(&self, id: &str, patch: &RecordPatch) -> Result<bool> {
        if let Ok(mut records) = self.records.lock() {
            if let Some(existing) = records.iter_mut().find(|r| r.id == id) {
                *existing = existing.merged(patch);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn delete_record(&self, id: &str) -> Result<()> {
        if let Ok(mut records) = self.records.lock() {
            records.retain(|r| r.id != id);
        }
        Ok(())
    }

    fn get_settings(&self) -> Settings {
        self.settings
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        if let Ok(mut stored) = self.settings.lock() {
            *stored = settings.clone();
        }
        Ok(())
    }
}

/// Notifier that collects delivered messages instead of showing them
#[derive(Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<(String, Severity)>>,
}

impl CollectingNotifier {
    pub fn messages(&self) -> Vec<(String, Severity)> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.clear();
        }
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((message.to_string(), severity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_merges_and_reports_presence() {
        let store = MemoryStore::default();
        let record = Record::new("5", "Coffee", "Food", "2025-06-01");
        store.save_record(&record).unwrap();

        let patch = RecordPatch {
            amount: Some("6".to_string()),
            ..Default::default()
        };
        assert!(store.update_record(&record.id, &patch).unwrap());
        assert!(!store.update_record("missing-id", &patch).unwrap());

        let records = store.get_records();
        assert_eq!(records[0].amount, "6");
        assert_eq!(records[0].description, "Coffee");
    }

    #[test]
    fn test_delete_is_noop_for_unknown_id() {
        let store = MemoryStore::default();
        store
            .save_record(&Record::new("5", "Coffee", "Food", "2025-06-01"))
            .unwrap();
        store.delete_record("missing-id").unwrap();
        assert_eq!(store.get_records().len(), 1);
    }
}
