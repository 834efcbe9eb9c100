//! Notifier port - advisory delivery abstraction

use serde::{Deserialize, Serialize};

/// How loudly a message should be surfaced
///
/// `Info` messages are advisories: the triggering action still goes
/// through. `Urgent` messages accompany blocked actions or crossed limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Urgent,
}

/// Delivery target for user-facing advisories
///
/// Validation and aggregation report through this trait so the core stays
/// free of any rendering concern. Implementations decide how (or whether)
/// a message reaches the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}
