//! Config command - show and change user settings

use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use satchel_core::{Currency, Settings, Theme};

use super::get_context;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a settings value
    Set {
        /// Key: theme, currency, language, display-name, monthly-report
        key: String,
        /// New value
        value: String,
    },
    /// Reset all settings to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => run_show(json),
        ConfigCommands::Set { key, value } => run_set(&key, &value),
        ConfigCommands::Reset { force } => run_reset(force),
    }
}

fn run_show(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let settings = ctx.store.get_settings();

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    println!("{}", "Settings".bold());
    let mut table = output::create_table();
    table.add_row(vec!["Theme", settings.theme.as_str()]);
    table.add_row(vec!["Currency", settings.currency.code()]);
    table.add_row(vec!["Language", settings.language.as_str()]);
    table.add_row(vec![
        "Monthly report",
        if settings.monthly_report { "on" } else { "off" },
    ]);
    table.add_row(vec!["Display name", settings.display_name.as_str()]);
    println!("{}", table);

    Ok(())
}

fn run_set(key: &str, value: &str) -> Result<()> {
    let ctx = get_context()?;
    let mut settings = ctx.store.get_settings();

    match key {
        "theme" => settings.theme = value.parse::<Theme>().map_err(|e| anyhow!(e))?,
        "currency" => settings.currency = value.parse::<Currency>().map_err(|e| anyhow!(e))?,
        "language" => settings.language = value.to_string(),
        "display-name" => settings.display_name = value.to_string(),
        "monthly-report" => settings.monthly_report = parse_toggle(value)?,
        other => {
            return Err(anyhow!(
                "Unknown settings key '{}'. Valid keys: theme, currency, language, display-name, monthly-report",
                other
            ));
        }
    }

    ctx.store.save_settings(&settings)?;
    output::success(&format!("Set {} to {}", key, value));

    Ok(())
}

fn run_reset(force: bool) -> Result<()> {
    let ctx = get_context()?;

    if !force {
        if !Confirm::new()
            .with_prompt("Reset all settings to defaults?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    ctx.store.save_settings(&Settings::default())?;
    output::success("Settings reset to defaults");

    Ok(())
}

fn parse_toggle(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(anyhow!("Expected on/off, got '{}'", other)),
    }
}
