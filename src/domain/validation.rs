//! Page validation
//!
//! Decides whether a page's required fields are answered, taking
//! visibility and the unverifiable override into account.

use std::collections::BTreeSet;

use crate::schemas::{AnswerSet, Field, Page};

use super::evaluator::is_field_visible;

/// Result of a validation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// Names of the required, visible, verifiable fields that are not answered
    pub missing: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            missing: Vec::new(),
        }
    }

    /// Create a failed validation result
    pub fn failure(missing: Vec<String>) -> Self {
        ValidationResult {
            valid: false,
            missing,
        }
    }
}

/// Whether a single field's current value passes its check.
///
/// Without a validation predicate the value only has to be truthy.
pub fn is_field_answered(field: &Field, answers: &AnswerSet) -> bool {
    let value = answers.get(&field.name);
    match &field.validation {
        Some(check) => check(value),
        None => value.is_some_and(|v| v.is_truthy()),
    }
}

/// Whether a field takes part in page validation at all
fn is_gating(field: &Field, answers: &AnswerSet, unverifiable: &BTreeSet<String>) -> bool {
    field.required && !unverifiable.contains(&field.name) && is_field_visible(field, answers)
}

/// Validate a page against the current answers.
///
/// # Arguments
/// * `page` - The page being left
/// * `answers` - Current answer set
/// * `unverifiable` - Fields flagged as not checkable
///
/// # Returns
/// A ValidationResult listing every field that blocks progress
pub fn validate_page(
    page: &Page,
    answers: &AnswerSet,
    unverifiable: &BTreeSet<String>,
) -> ValidationResult {
    let missing: Vec<String> = page
        .fields
        .iter()
        .filter(|f| is_gating(f, answers, unverifiable))
        .filter(|f| !is_field_answered(f, answers))
        .map(|f| f.name.clone())
        .collect();

    if missing.is_empty() {
        ValidationResult::success()
    } else {
        ValidationResult::failure(missing)
    }
}

/// Whether every gating field on the page is answered
pub fn is_page_satisfied(
    page: &Page,
    answers: &AnswerSet,
    unverifiable: &BTreeSet<String>,
) -> bool {
    page.fields
        .iter()
        .filter(|f| is_gating(f, answers, unverifiable))
        .all(|f| is_field_answered(f, answers))
}
