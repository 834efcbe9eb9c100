//! List command - filter, search, and sort the record table

use anyhow::Result;
use regex::Regex;
use satchel_core::format::{format_currency, highlight};
use satchel_core::services::{compile_search_pattern, search_and_sort};
use satchel_core::{Currency, QueryCriteria, Record, SortKey};

use super::get_context;
use crate::output;

pub fn run(
    query: Option<String>,
    category: Option<String>,
    sort: String,
    regex: bool,
    json: bool,
    html: bool,
) -> Result<()> {
    let ctx = get_context()?;

    let criteria = QueryCriteria {
        query: query.unwrap_or_default(),
        category: category.unwrap_or_default(),
        // An unknown sort key silently keeps insertion order
        sort: sort.parse::<SortKey>().ok(),
        regex_mode: regex,
    };

    let records = ctx.store.get_records();
    let results = search_and_sort(&records, &criteria);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    let settings = ctx.store.get_settings();
    let pattern = search_pattern(&criteria);

    if html {
        println!("{}", render_html(&results, pattern.as_ref(), settings.currency));
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Description", "Category", "Date", "Amount"]);
    for record in &results {
        table.add_row(vec![
            record.description.clone(),
            record.category.clone(),
            record.date.clone(),
            signed_amount(record, settings.currency),
        ]);
    }
    println!("{}", table);
    println!("{} records", results.len());

    Ok(())
}

/// The pattern used for match highlighting mirrors how the filter matched:
/// regex-mode queries highlight as regexes, plain queries as literals
fn search_pattern(criteria: &QueryCriteria) -> Option<Regex> {
    if criteria.query.is_empty() {
        return None;
    }
    if criteria.regex_mode {
        compile_search_pattern(&criteria.query)
            .or_else(|| compile_search_pattern(&regex::escape(criteria.query.trim())))
    } else {
        compile_search_pattern(&regex::escape(criteria.query.trim()))
    }
}

/// Income shows as +, everything else as -, matching the table view the
/// dashboard balance is derived from
fn signed_amount(record: &Record, currency: Currency) -> String {
    let prefix = if record.is_income() { "+" } else { "-" };
    format!("{}{}", prefix, format_currency(&record.amount, currency))
}

fn render_html(records: &[Record], pattern: Option<&Regex>, currency: Currency) -> String {
    let mut html = String::from(
        "<table>\n  <thead>\n    <tr><th>Description</th><th>Category</th><th>Date</th><th>Amount</th></tr>\n  </thead>\n  <tbody>\n",
    );
    for record in records {
        html.push_str(&format!(
            "    <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            highlight(&record.description, pattern),
            highlight(&record.category, None),
            highlight(&record.date, None),
            signed_amount(record, currency),
        ));
    }
    html.push_str("  </tbody>\n</table>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_amount_prefixes() {
        let income = Record::new("100", "Allowance", "Income", "2025-06-01");
        let expense = Record::new("2.50", "Coffee", "Food", "2025-06-01");
        assert_eq!(signed_amount(&income, Currency::Usd), "+$100.00");
        assert_eq!(signed_amount(&expense, Currency::Usd), "-$2.50");
    }

    #[test]
    fn test_html_rendering_highlights_matches() {
        let records = vec![Record::new("2.50", "Morning coffee", "Food", "2025-06-01")];
        let criteria = QueryCriteria {
            query: "coffee".to_string(),
            ..Default::default()
        };
        let html = render_html(&records, search_pattern(&criteria).as_ref(), Currency::Usd);
        assert!(html.contains("<mark>coffee</mark>"));
        assert!(html.contains("-$2.50"));
    }

    #[test]
    fn test_plain_query_with_metacharacters_highlights_literally() {
        let criteria = QueryCriteria {
            query: "c.t".to_string(),
            ..Default::default()
        };
        let pattern = search_pattern(&criteria).unwrap();
        assert!(pattern.is_match("c.t"));
        assert!(!pattern.is_match("cat"));
    }
}
