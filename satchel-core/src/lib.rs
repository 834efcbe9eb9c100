//! Satchel Core - business logic for personal finance tracking
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (Record, Settings) and field rules
//! - **ports**: Trait definitions for external dependencies (RecordStore, Notifier)
//! - **services**: Business logic orchestration (validation, query, dashboard, archive)
//! - **adapters**: Concrete implementations (JSON file store, in-memory store)
//!
//! The query and aggregation services are pure functions over record
//! snapshots; persistence and advisory delivery stay behind the ports.

pub mod adapters;
pub mod domain;
pub mod format;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::json_store::JsonFileStore;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{Currency, Record, RecordPatch, Settings, Theme};
pub use ports::{Notifier, RecordStore, Severity};
pub use services::{
    ArchiveService, DashboardMetrics, DashboardService, QueryCriteria, SortKey, ValidationService,
};

/// Main context for Satchel operations
///
/// This is the primary entry point for all business logic. It holds the
/// record store and the services wired to it and to the notifier.
pub struct SatchelContext {
    pub store: Arc<dyn RecordStore>,
    pub validation_service: ValidationService,
    pub dashboard_service: DashboardService,
    pub archive_service: ArchiveService,
}

impl SatchelContext {
    /// Create a context backed by the JSON file store in the given
    /// data directory
    pub fn new(data_dir: &Path, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::new(data_dir)?);
        Ok(Self::with_store(store, notifier))
    }

    /// Create a context over any store implementation
    pub fn with_store(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        let validation_service = ValidationService::new(Arc::clone(&notifier));
        let dashboard_service = DashboardService::new(Arc::clone(&notifier));
        let archive_service = ArchiveService::new(Arc::clone(&store), notifier);

        Self {
            store,
            validation_service,
            dashboard_service,
            archive_service,
        }
    }
}
