//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod archive;
mod dashboard;
pub mod logging;
pub mod query;
mod validate;

pub use archive::{Archive, ArchiveService, ImportSummary};
pub use dashboard::{
    weekday_bars, BudgetStatus, DashboardMetrics, DashboardService, WeekdayBar,
    ENTERTAINMENT_BUDGET_LIMIT, MONTHLY_BUDGET_LIMIT,
};
pub use logging::{LogEntry, LogEvent, LoggingService};
pub use query::{compile_search_pattern, search_and_sort, QueryCriteria, SortKey};
pub use validate::{ValidationIssue, ValidationService};
