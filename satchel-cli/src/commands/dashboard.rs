//! Dashboard command - balance, totals, weekly chart, and budget meters

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use satchel_core::format::format_currency_value;
use satchel_core::services::{weekday_bars, BudgetStatus};
use satchel_core::Currency;

use super::get_context;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    let records = ctx.store.get_records();
    let metrics = ctx
        .dashboard_service
        .compute(&records, Local::now().date_naive());

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    let currency = ctx.store.get_settings().currency;

    println!("{}", "Dashboard".bold());
    println!();
    println!("  Balance:  {}", format_currency_value(metrics.balance, currency));
    println!("  Income:   {}", format_currency_value(metrics.income, currency));
    println!("  Expenses: {}", format_currency_value(metrics.expenses, currency));
    println!();

    println!("{}", "Spending by weekday".bold());
    for bar in weekday_bars(&metrics) {
        // 5% per block, so the floored minimum renders one block and the
        // busiest day renders twenty
        let blocks = (bar.height_pct / 5.0).round() as usize;
        println!(
            "  {} {} {}",
            bar.label,
            "█".repeat(blocks),
            format_currency_value(bar.amount, currency).dimmed()
        );
    }
    println!();

    print_budget("Monthly budget", &metrics.monthly, currency);
    print_budget("Entertainment budget", &metrics.entertainment, currency);

    Ok(())
}

fn print_budget(name: &str, status: &BudgetStatus, currency: Currency) {
    let summary = format!(
        "{}: {} of {} ({:.0}% used)",
        name,
        format_currency_value(status.spent, currency),
        format_currency_value(status.limit, currency),
        status.percent_used
    );
    if status.exceeded() {
        println!("{}", summary.red());
    } else if status.near_limit() {
        println!("{}", summary.yellow());
    } else {
        println!("{}", summary);
    }
}
