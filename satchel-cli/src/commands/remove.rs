//! Remove command - delete a record

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use super::get_context;
use crate::output;

pub fn run(id: &str, force: bool) -> Result<()> {
    let ctx = get_context()?;

    let records = ctx.store.get_records();
    let record = match records.iter().find(|r| r.id == id) {
        Some(record) => record,
        None => {
            output::error(&format!("Record '{}' not found", id));
            std::process::exit(1);
        }
    };

    if !force {
        println!(
            "\n{}",
            format!(
                "This will delete \"{}\" ({}, {}).",
                record.description, record.category, record.date
            )
            .yellow()
        );

        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    ctx.store.delete_record(id)?;
    println!("\n{} Record deleted\n", "✓".green());

    Ok(())
}
