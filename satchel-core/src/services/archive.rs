//! Archive service - whole-store export and import

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::{Record, Settings};
use crate::ports::{Notifier, RecordStore, Severity};

/// The export document shape: everything a user needs to move their data
/// to another machine or browser profile
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archive {
    pub records: Vec<Record>,
    pub settings: Settings,
    pub export_date: DateTime<Utc>,
}

/// What an import actually changed
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub records_added: usize,
    pub settings_replaced: bool,
}

/// Archive service for data export and import
pub struct ArchiveService {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
}

impl ArchiveService {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Serialize the current records and settings as a pretty JSON document
    pub fn export(&self) -> Result<String> {
        let archive = Archive {
            records: self.store.get_records(),
            settings: self.store.get_settings(),
            export_date: Utc::now(),
        };
        Ok(serde_json::to_string_pretty(&archive)?)
    }

    /// Merge an exported document into the store
    ///
    /// Imported records are appended as-is (no id deduplication); settings,
    /// when present, replace the stored object wholesale. A document whose
    /// `records` field is missing or not an array is rejected with an
    /// urgent advisory and storage is left untouched.
    pub fn import(&self, document: &str) -> Result<ImportSummary> {
        let value: serde_json::Value = match serde_json::from_str(document) {
            Ok(value) => value,
            Err(e) => {
                return Err(self.reject(format!("Import failed: not valid JSON ({})", e)));
            }
        };

        let records_value = match value.get("records") {
            Some(records) if records.is_array() => records.clone(),
            _ => {
                return Err(self.reject("Import failed: document has no records array"));
            }
        };

        let records: Vec<Record> = match serde_json::from_value(records_value) {
            Ok(records) => records,
            Err(e) => {
                return Err(self.reject(format!("Import failed: malformed record entry ({})", e)));
            }
        };

        let settings: Option<Settings> = match value.get("settings") {
            Some(settings_value) => match serde_json::from_value(settings_value.clone()) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    return Err(
                        self.reject(format!("Import failed: malformed settings object ({})", e))
                    );
                }
            },
            None => None,
        };

        // All parsing succeeded; only now touch storage
        let records_added = records.len();
        for record in &records {
            self.store.save_record(record)?;
        }

        let settings_replaced = settings.is_some();
        if let Some(settings) = settings {
            self.store.save_settings(&settings)?;
        }

        Ok(ImportSummary {
            records_added,
            settings_replaced,
        })
    }

    fn reject(&self, message: impl Into<String>) -> Error {
        let message = message.into();
        self.notifier.notify(&message, Severity::Urgent);
        Error::import(message)
    }
}
