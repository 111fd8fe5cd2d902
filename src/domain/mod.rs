//! Walkthrough engine: evaluation, validation, navigation and branch logic

mod branches;
mod evaluator;
mod ledger;
mod navigation;
mod outreach;
mod session;
mod validation;


#[cfg(test)]
mod scenario_tests;

pub use evaluator::{
    field_label, field_options, is_field_visible, is_page_visible, is_visible, page_description,
    resolve, visible_fields,
};
pub use ledger::{verification_status, ProviderLedger};
pub use navigation::{
    next_visible_index, previous_visible_index, NavigationPosition, StayReason, Transition,
};
pub use outreach::{unverifiable_note, OutreachTracker, UNVERIFIABLE_NOTE_PREFIX};
pub use session::{Progress, Session, ToggleOutcome, SUBMITTED_MESSAGE};
pub use validation::{is_field_answered, is_page_satisfied, validate_page, ValidationResult};
