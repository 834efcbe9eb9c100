//! Integration tests for satchel-core services
//!
//! These tests verify the full pipeline against the real JSON file store:
//! records go in through validation and the store, then come back out
//! through the query engine, the dashboard aggregation, and formatting.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use satchel_core::adapters::{CollectingNotifier, JsonFileStore};
use satchel_core::format::format_currency;
use satchel_core::services::{search_and_sort, weekday_bars, QueryCriteria, SortKey};
use satchel_core::{
    Currency, Record, RecordPatch, RecordStore, SatchelContext, Settings, Severity,
    ValidationService,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Create a context over a file store rooted in the temp directory
fn create_test_context(temp_dir: &TempDir) -> (SatchelContext, Arc<CollectingNotifier>) {
    let notifier = Arc::new(CollectingNotifier::default());
    let ctx = SatchelContext::new(temp_dir.path(), notifier.clone())
        .expect("Failed to create satchel context");
    (ctx, notifier)
}

/// Create a test record
fn create_test_record(amount: &str, description: &str, category: &str, date: &str) -> Record {
    Record::new(amount, description, category, date)
}

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

// ============================================================================
// Store Round-Trip Tests
// ============================================================================

#[test]
fn test_save_then_get_contains_exactly_the_new_record() {
    let temp_dir = TempDir::new().unwrap();
    let (ctx, _) = create_test_context(&temp_dir);

    let record = create_test_record("12.50", "Lunch", "Food", "2025-06-10");
    ctx.store.save_record(&record).unwrap();

    let records = ctx.store.get_records();
    assert_eq!(records.len(), 1);
    let stored = &records[0];
    assert_eq!(stored.id, record.id);
    assert_eq!(stored.amount, "12.50");
    assert_eq!(stored.description, "Lunch");
    assert_eq!(stored.category, "Food");
    assert_eq!(stored.date, "2025-06-10");
    assert_eq!(stored.created_at, stored.updated_at);
}

#[test]
fn test_update_merges_and_revalidates_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let (ctx, _) = create_test_context(&temp_dir);

    let record = create_test_record("12.50", "Lunch", "Food", "2025-06-10");
    ctx.store.save_record(&record).unwrap();

    // The caller validates the merged result before persisting
    let patch = RecordPatch {
        amount: Some("15.75".to_string()),
        ..Default::default()
    };
    let merged = record.merged(&patch);
    let issues = ctx.validation_service.validate(&merged);
    assert!(ValidationService::is_valid(&issues));

    assert!(ctx.store.update_record(&record.id, &patch).unwrap());
    let stored = &ctx.store.get_records()[0];
    assert_eq!(stored.amount, "15.75");
    assert_eq!(stored.description, "Lunch");
}

#[test]
fn test_validation_blocks_bad_update_before_persistence() {
    let temp_dir = TempDir::new().unwrap();
    let (ctx, notifier) = create_test_context(&temp_dir);

    let record = create_test_record("12.50", "Lunch", "Food", "2025-06-10");
    ctx.store.save_record(&record).unwrap();

    let patch = RecordPatch {
        amount: Some("12.345".to_string()),
        ..Default::default()
    };
    let merged = record.merged(&patch);
    let issues = ctx.validation_service.validate(&merged);
    assert!(!ValidationService::is_valid(&issues));
    assert!(notifier
        .messages()
        .iter()
        .any(|(_, severity)| *severity == Severity::Urgent));

    // Caller never persists the failed merge; the stored record is intact
    assert_eq!(ctx.store.get_records()[0].amount, "12.50");
}

// ============================================================================
// Query Pipeline Tests
// ============================================================================

#[test]
fn test_query_pipeline_over_persisted_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let (ctx, _) = create_test_context(&temp_dir);

    for (amount, description, category, date) in [
        ("100", "June allowance", "Income", "2025-06-01"),
        ("10.00", "Bus pass", "Transport", "2025-06-03"),
        ("2.50", "Morning coffee", "Food", "2025-06-01"),
        ("7.25", "Cinema ticket", "Entertainment", "2025-06-02"),
    ] {
        ctx.store
            .save_record(&create_test_record(amount, description, category, date))
            .unwrap();
    }

    let criteria = QueryCriteria {
        sort: Some(SortKey::AmountAsc),
        ..Default::default()
    };
    let ordered = search_and_sort(&ctx.store.get_records(), &criteria);
    let amounts: Vec<&str> = ordered.iter().map(|r| r.amount.as_str()).collect();
    assert_eq!(amounts, vec!["2.50", "7.25", "10.00", "100"]);

    let criteria = QueryCriteria {
        query: "coffee".to_string(),
        category: "food".to_string(),
        sort: Some(SortKey::DateDesc),
        ..Default::default()
    };
    let matched = search_and_sort(&ctx.store.get_records(), &criteria);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].description, "Morning coffee");
}

// ============================================================================
// Dashboard Pipeline Tests
// ============================================================================

#[test]
fn test_dashboard_over_persisted_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let (ctx, _) = create_test_context(&temp_dir);

    ctx.store
        .save_record(&create_test_record("100", "Allowance", "Income", "2025-06-01"))
        .unwrap();
    ctx.store
        .save_record(&create_test_record("40", "Groceries", "Food", "2025-06-02"))
        .unwrap();

    let metrics = ctx
        .dashboard_service
        .compute(&ctx.store.get_records(), fixed_today());
    assert_eq!(metrics.income, Decimal::from(100));
    assert_eq!(metrics.expenses, Decimal::from(40));
    assert_eq!(metrics.balance, Decimal::from(60));
    assert_eq!(metrics.monthly.spent, Decimal::from(40));

    let bars = weekday_bars(&metrics);
    assert_eq!(bars.len(), 7);
    assert_eq!(bars[0].label, "Mon");
    // 2025-06-02 is a Monday and the only spending day
    assert_eq!(bars[0].height_pct, 100.0);

    // Formatting the balance in the stored settings' currency
    let settings = ctx.store.get_settings();
    assert_eq!(settings, Settings::default());
    assert_eq!(
        format_currency(&metrics.balance.to_string(), settings.currency),
        "$60.00"
    );
    assert_eq!(
        format_currency(&metrics.balance.to_string(), Currency::Eur),
        "55,20 €"
    );
}

// ============================================================================
// Archive Tests
// ============================================================================

#[test]
fn test_archive_export_import_between_stores() {
    let source_dir = TempDir::new().unwrap();
    let (source_ctx, _) = create_test_context(&source_dir);

    source_ctx
        .store
        .save_record(&create_test_record("12.50", "Lunch", "Food", "2025-06-10"))
        .unwrap();
    let mut settings = source_ctx.store.get_settings();
    settings.currency = Currency::Gbp;
    source_ctx.store.save_settings(&settings).unwrap();

    let document = source_ctx.archive_service.export().unwrap();

    let target_dir = TempDir::new().unwrap();
    let (target_ctx, _) = create_test_context(&target_dir);
    target_ctx
        .store
        .save_record(&create_test_record("3", "Existing", "Food", "2025-06-01"))
        .unwrap();

    let summary = target_ctx.archive_service.import(&document).unwrap();
    assert_eq!(summary.records_added, 1);
    assert!(summary.settings_replaced);

    // Concatenated after the existing record, settings overwritten
    let records = target_ctx.store.get_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].description, "Existing");
    assert_eq!(records[1].description, "Lunch");
    assert_eq!(target_ctx.store.get_settings().currency, Currency::Gbp);
}

#[test]
fn test_malformed_archive_leaves_store_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let (ctx, notifier) = create_test_context(&temp_dir);

    ctx.store
        .save_record(&create_test_record("3", "Existing", "Food", "2025-06-01"))
        .unwrap();

    let result = ctx.archive_service.import(r#"{"records": 42}"#);
    assert!(result.is_err());
    assert_eq!(ctx.store.get_records().len(), 1);
    assert_eq!(notifier.messages().len(), 1);
    assert_eq!(notifier.messages()[0].1, Severity::Urgent);
}

// ============================================================================
// Degradation Tests
// ============================================================================

#[test]
fn test_corrupt_blob_degrades_to_empty_view() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("records.json"), "[{\"id\":").unwrap();
    std::fs::write(temp_dir.path().join("settings.json"), "!!").unwrap();

    let store = JsonFileStore::new(temp_dir.path()).unwrap();
    assert!(store.get_records().is_empty());
    assert_eq!(store.get_settings(), Settings::default());

    // The store still accepts writes afterwards
    store
        .save_record(&create_test_record("1", "Fresh start", "Food", "2025-06-01"))
        .unwrap();
    assert_eq!(store.get_records().len(), 1);
}
