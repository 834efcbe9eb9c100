//! Dashboard service - aggregated metrics over the full record collection

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::Record;
use crate::ports::{Notifier, Severity};

/// Fixed monthly spending ceiling, in base currency units
pub const MONTHLY_BUDGET_LIMIT: i64 = 1000;

/// Fixed ceiling for entertainment-category spending
pub const ENTERTAINMENT_BUDGET_LIMIT: i64 = 200;

/// Bars never render below this height so empty days stay visible
const MIN_BAR_HEIGHT_PCT: f64 = 5.0;

/// Aggregated dashboard numbers
///
/// `weekday_spending` is Sunday-indexed (0=Sun .. 6=Sat) because that is
/// how the buckets accumulate; `weekday_bars` applies the Monday-first
/// display order on top. Keep the two steps separate - collapsing them
/// changes which bar shows which day.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub weekday_spending: [Decimal; 7],
    pub monthly: BudgetStatus,
    pub entertainment: BudgetStatus,
}

/// Utilization of one spending ceiling
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub spent: Decimal,
    pub limit: Decimal,
    /// Percentage of the ceiling used, clamped to 100
    pub percent_used: f64,
}

impl BudgetStatus {
    fn new(spent: Decimal, limit: Decimal) -> Self {
        let percent_used = (spent / limit * Decimal::from(100))
            .to_f64()
            .unwrap_or(0.0)
            .min(100.0);
        Self {
            spent,
            limit,
            percent_used,
        }
    }

    /// True when spending is strictly past the ceiling; landing exactly on
    /// the ceiling is at-limit, not exceeded
    pub fn exceeded(&self) -> bool {
        self.spent > self.limit
    }

    /// True when spending is strictly past 80% of the ceiling
    pub fn near_limit(&self) -> bool {
        self.spent > self.limit * Decimal::new(8, 1)
    }
}

/// One chart bar, already in display order
#[derive(Debug, Clone, Serialize)]
pub struct WeekdayBar {
    pub label: &'static str,
    pub amount: Decimal,
    /// Height relative to the busiest day, floored at a visible minimum
    pub height_pct: f64,
}

/// Dashboard service for aggregate metrics
pub struct DashboardService {
    notifier: Arc<dyn Notifier>,
}

impl DashboardService {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Compute dashboard metrics over the full (unfiltered) collection
    ///
    /// `today` anchors the monthly budget window; callers pass wall-clock
    /// today, tests pass a fixed date. Budget advisories are re-raised on
    /// every call - repeat renders repeat the warning on purpose.
    pub fn compute(&self, records: &[Record], today: NaiveDate) -> DashboardMetrics {
        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        let mut weekday_spending = [Decimal::ZERO; 7];
        let mut monthly_spent = Decimal::ZERO;
        let mut entertainment_spent = Decimal::ZERO;

        for record in records {
            let amount = record.amount_value();

            if record.is_income() {
                income += amount;
            } else {
                expenses += amount;
                // Records without a parseable date are skipped here, not
                // zero-filled into a bucket
                if let Some(date) = record.parsed_date() {
                    weekday_spending[date.weekday().num_days_from_sunday() as usize] += amount;
                    if date.year() == today.year() && date.month() == today.month() {
                        monthly_spent += amount;
                    }
                }
            }

            if record.category.to_lowercase().contains("entertainment") {
                entertainment_spent += amount;
            }
        }

        let monthly = BudgetStatus::new(monthly_spent, Decimal::from(MONTHLY_BUDGET_LIMIT));
        let entertainment =
            BudgetStatus::new(entertainment_spent, Decimal::from(ENTERTAINMENT_BUDGET_LIMIT));

        if monthly.exceeded() {
            self.notifier.notify(
                &format!(
                    "Monthly budget exceeded: {} spent against a limit of {}",
                    monthly.spent, monthly.limit
                ),
                Severity::Urgent,
            );
        } else if monthly.near_limit() {
            self.notifier.notify(
                &format!(
                    "Monthly budget is {:.0}% used ({} of {})",
                    monthly.percent_used, monthly.spent, monthly.limit
                ),
                Severity::Info,
            );
        }

        if entertainment.exceeded() {
            self.notifier.notify(
                &format!(
                    "Entertainment budget exceeded: {} spent against a limit of {}",
                    entertainment.spent, entertainment.limit
                ),
                Severity::Urgent,
            );
        }

        DashboardMetrics {
            balance: income - expenses,
            income,
            expenses,
            weekday_spending,
            monthly,
            entertainment,
        }
    }
}

/// Sunday-indexed labels matching the accumulation buckets
const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Monday-first display order over the Sunday-indexed buckets
const DISPLAY_ORDER: [usize; 7] = [1, 2, 3, 4, 5, 6, 0];

/// Project the weekday buckets into renderable bars
///
/// Heights are percentages of the busiest day (denominator never below 1,
/// so an all-zero week divides cleanly) with a floor that keeps zero-value
/// days visible.
pub fn weekday_bars(metrics: &DashboardMetrics) -> Vec<WeekdayBar> {
    let max_spent = metrics
        .weekday_spending
        .iter()
        .copied()
        .max()
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ONE);

    DISPLAY_ORDER
        .iter()
        .map(|&day| {
            let amount = metrics.weekday_spending[day];
            let height_pct = (amount / max_spent * Decimal::from(100))
                .to_f64()
                .unwrap_or(0.0)
                .max(MIN_BAR_HEIGHT_PCT);
            WeekdayBar {
                label: DAY_LABELS[day],
                amount,
                height_pct,
            }
        })
        .collect()
}
