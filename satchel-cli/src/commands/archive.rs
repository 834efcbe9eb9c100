//! Export and import commands - move data in and out as JSON documents

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Confirm;
use satchel_core::services::LogEvent;

use super::{get_context, get_logger, log_event};
use crate::output;

pub fn run_export(output_path: Option<PathBuf>) -> Result<()> {
    let ctx = get_context()?;
    let document = ctx.archive_service.export()?;

    match output_path {
        Some(path) => {
            std::fs::write(&path, &document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output::success(&format!("Exported to {}", path.display()));
        }
        None => println!("{}", document),
    }

    Ok(())
}

pub fn run_import(file: &Path, force: bool) -> Result<()> {
    let ctx = get_context()?;

    let document = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    if !force {
        println!(
            "\n{}",
            format!(
                "This will merge all records from {} into your data.",
                file.display()
            )
            .yellow()
        );
        println!(
            "{}\n",
            "Settings in the document replace your current settings.".dimmed()
        );

        if !Confirm::new()
            .with_prompt("Continue?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    match ctx.archive_service.import(&document) {
        Ok(summary) => {
            let settings_note = if summary.settings_replaced {
                ", settings replaced"
            } else {
                ""
            };
            output::success(&format!(
                "Imported {} records{}",
                summary.records_added, settings_note
            ));
            Ok(())
        }
        Err(e) => {
            // The rejection reason already reached the terminal through the
            // notifier; record it in the event log and bail
            let logger = get_logger();
            log_event(
                &logger,
                LogEvent::new("import_failed").with_error(e.to_string()),
            );
            std::process::exit(1);
        }
    }
}
