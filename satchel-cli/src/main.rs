//! Satchel CLI - personal finance tracking in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use satchel_core::services::LogEvent;

mod commands;
mod output;

use commands::{add, archive, config, dashboard, edit, list, logs, remove};

/// Satchel - personal finance tracking in your terminal
#[derive(Parser)]
#[command(name = "sat", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new transaction
    Add {
        /// Amount, e.g. 12.50 (always non-negative)
        #[arg(long, short)]
        amount: String,
        /// What the money was for
        #[arg(long, short)]
        description: String,
        /// Category label; "Income" marks money coming in
        #[arg(long, short)]
        category: String,
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List records with filtering, search, and sorting
    List {
        /// Search text matched against descriptions
        #[arg(long, short)]
        query: Option<String>,
        /// Exact category filter (case-insensitive)
        #[arg(long, short)]
        category: Option<String>,
        /// Sort key: date-asc, date-desc, amount-asc, amount-desc,
        /// category-asc, category-desc
        #[arg(long, short, default_value = "date-desc")]
        sort: String,
        /// Treat the query as a regular expression
        #[arg(long)]
        regex: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Output as an HTML table with search matches marked
        #[arg(long)]
        html: bool,
    },

    /// Show balance, totals, weekly spending, and budget usage
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update fields on an existing record
    Edit {
        /// Record ID
        id: String,
        /// New amount
        #[arg(long, short)]
        amount: Option<String>,
        /// New description
        #[arg(long, short)]
        description: Option<String>,
        /// New category
        #[arg(long, short)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a record
    Rm {
        /// Record ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Export all records and settings as a JSON document
    Export {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Import records and settings from an exported document
    Import {
        /// Path to the exported JSON document
        file: PathBuf,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Show and change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Add { .. } => "add",
            Commands::List { .. } => "list",
            Commands::Dashboard { .. } => "dashboard",
            Commands::Edit { .. } => "edit",
            Commands::Rm { .. } => "rm",
            Commands::Export { .. } => "export",
            Commands::Import { .. } => "import",
            Commands::Config { .. } => "config",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logger = commands::get_logger();
    commands::log_event(
        &logger,
        LogEvent::new("command_executed").with_command(cli.command.name()),
    );

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            commands::log_event(
                &logger,
                LogEvent::new("command_failed").with_error(e.to_string()),
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Add {
            amount,
            description,
            category,
            date,
            json,
        } => add::run(amount, description, category, date, json),
        Commands::List {
            query,
            category,
            sort,
            regex,
            json,
            html,
        } => list::run(query, category, sort, regex, json, html),
        Commands::Dashboard { json } => dashboard::run(json),
        Commands::Edit {
            id,
            amount,
            description,
            category,
            date,
            json,
        } => edit::run(id, amount, description, category, date, json),
        Commands::Rm { id, force } => remove::run(&id, force),
        Commands::Export { output } => archive::run_export(output),
        Commands::Import { file, force } => archive::run_import(&file, force),
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
