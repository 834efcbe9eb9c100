//! Add command - record a new transaction

use anyhow::Result;
use chrono::Local;
use satchel_core::{Record, ValidationService};

use super::get_context;
use crate::output;

pub fn run(
    amount: String,
    description: String,
    category: String,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;

    let date = date.unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());

    // Whitespace is normalized before validation so "  bus   pass " is
    // accepted as "bus pass"
    let record = Record::new(
        amount.trim(),
        Record::normalize_text(&description),
        Record::normalize_text(&category),
        date.trim(),
    );

    let issues = ctx.validation_service.validate(&record);
    if !ValidationService::is_valid(&issues) {
        // The blocking reason was already delivered through the notifier
        output::error("Record not saved");
        std::process::exit(1);
    }

    ctx.store.save_record(&record)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        output::success("Record saved");
        println!("  ID: {}", record.id);
        println!("  {} | {} | {}", record.description, record.category, record.date);
    }

    Ok(())
}
