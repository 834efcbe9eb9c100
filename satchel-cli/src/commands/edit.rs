//! Edit command - update fields on an existing record

use anyhow::Result;
use satchel_core::{Record, RecordPatch, ValidationService};

use super::get_context;
use crate::output;

pub fn run(
    id: String,
    amount: Option<String>,
    description: Option<String>,
    category: Option<String>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;

    let records = ctx.store.get_records();
    let existing = match records.iter().find(|r| r.id == id) {
        Some(record) => record,
        None => {
            output::error(&format!("Record '{}' not found", id));
            std::process::exit(1);
        }
    };

    let patch = RecordPatch {
        amount: amount.map(|a| a.trim().to_string()),
        description: description.map(|d| Record::normalize_text(&d)),
        category: category.map(|c| Record::normalize_text(&c)),
        date: date.map(|d| d.trim().to_string()),
    };

    // The merged result is validated as a whole before anything persists
    let merged = existing.merged(&patch);
    let issues = ctx.validation_service.validate(&merged);
    if !ValidationService::is_valid(&issues) {
        output::error("Record not updated");
        std::process::exit(1);
    }

    if !ctx.store.update_record(&id, &patch)? {
        output::error(&format!("Record '{}' not found", id));
        std::process::exit(1);
    }

    if json {
        let updated = ctx.store.get_records().into_iter().find(|r| r.id == id);
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        output::success("Record updated");
    }

    Ok(())
}
