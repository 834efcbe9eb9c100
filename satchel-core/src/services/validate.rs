//! Validation service - field rules for candidate records

use std::sync::Arc;

use serde::Serialize;

use crate::domain::record::{
    has_repeated_word, is_valid_amount, is_valid_category, is_valid_date, is_valid_description,
};
use crate::domain::Record;
use crate::ports::{Notifier, Severity};

/// One reported outcome of a validation pass
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    fn blocking(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            severity: Severity::Urgent,
        }
    }

    fn advisory(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            severity: Severity::Info,
        }
    }
}

/// Validation service for candidate records
///
/// Applies the field rules in a fixed order and stops at the first blocking
/// failure, so a caller sees exactly one blocking reason per attempt.
/// Advisory findings are reported but never block. Every issue is also
/// delivered through the notifier; validation itself never persists
/// anything.
pub struct ValidationService {
    notifier: Arc<dyn Notifier>,
}

impl ValidationService {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Check a candidate record against all field rules
    ///
    /// Returns the full outcome list: at most one blocking issue (the first
    /// rule that failed) plus any advisories raised before it.
    pub fn validate(&self, candidate: &Record) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if !is_valid_description(&candidate.description) {
            issues.push(ValidationIssue::blocking(
                "description",
                "Invalid description: cannot be empty or start/end with whitespace",
            ));
            return self.report(issues);
        }

        if has_repeated_word(&candidate.description) {
            issues.push(ValidationIssue::advisory(
                "description",
                "Description repeats a word back to back",
            ));
        }

        if !is_valid_amount(&candidate.amount) {
            issues.push(ValidationIssue::blocking(
                "amount",
                "Invalid amount: must be a non-negative number with up to 2 decimal places",
            ));
            return self.report(issues);
        }

        if !is_valid_category(&candidate.category) {
            issues.push(ValidationIssue::blocking(
                "category",
                "Invalid category: only letters, spaces, and hyphens allowed",
            ));
            return self.report(issues);
        }

        if !is_valid_date(&candidate.date) {
            issues.push(ValidationIssue::blocking(
                "date",
                "Invalid date: must be a real-looking YYYY-MM-DD value",
            ));
            return self.report(issues);
        }

        self.report(issues)
    }

    /// True when the outcome list contains no blocking issue
    pub fn is_valid(issues: &[ValidationIssue]) -> bool {
        issues.iter().all(|i| i.severity != Severity::Urgent)
    }

    fn report(&self, issues: Vec<ValidationIssue>) -> Vec<ValidationIssue> {
        for issue in &issues {
            self.notifier.notify(&issue.message, issue.severity);
        }
        issues
    }
}
