//! Walkthrough session
//!
//! Owns all mutable state of one walkthrough: the answer set, provider
//! ledger, outreach tracker, manual notes and navigation position. Every
//! change goes through a method here; nothing is shared or global.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::prompt::Prompter;
use crate::schemas::{AnswerSet, AnswerValue, BranchConfig, Field, Page, PageGraph};

use super::evaluator::{field_label, visible_fields};
use super::ledger::ProviderLedger;
use super::navigation::{
    next_visible_index, previous_visible_index, NavigationPosition, StayReason, Transition,
};
use super::outreach::{unverifiable_note, OutreachTracker};
use super::validation::{is_page_satisfied, validate_page, ValidationResult};

/// Message shown when the last page is submitted
pub const SUBMITTED_MESSAGE: &str = "Form submitted successfully!";

/// Outcome of toggling a field's unverifiable flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Field flagged; the derived note was appended
    Marked { note: String },
    /// Field unflagged; its note was removed
    Unmarked,
    /// Operator declined the note, nothing changed
    Cancelled,
    /// No field with that name in the graph
    UnknownField,
}

/// Position within the graph for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based step number
    pub step: usize,
    pub total: usize,
}

impl Progress {
    /// Completed fraction, 0.0 to 1.0
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.step as f64 / self.total as f64
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {} of {}", self.step, self.total)
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub(super) graph: Arc<PageGraph>,
    pub(super) branches: BranchConfig,
    pub(super) answers: AnswerSet,
    pub(super) ledger: ProviderLedger,
    pub(super) outreach: OutreachTracker,
    pub(super) position: NavigationPosition,
    pub(super) manual_notes: BTreeMap<usize, String>,
}

impl Session {
    pub fn new(graph: Arc<PageGraph>, branches: BranchConfig) -> Self {
        Session {
            graph,
            branches,
            answers: AnswerSet::new(),
            ledger: ProviderLedger::new(),
            outreach: OutreachTracker::new(),
            position: NavigationPosition::default(),
            manual_notes: BTreeMap::new(),
        }
    }

    // ===== READ-ONLY VIEWS =====

    pub fn graph(&self) -> &PageGraph {
        &self.graph
    }

    pub fn branches(&self) -> &BranchConfig {
        &self.branches
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn ledger(&self) -> &ProviderLedger {
        &self.ledger
    }

    pub fn outreach(&self) -> &OutreachTracker {
        &self.outreach
    }

    pub fn outreach_notes(&self) -> &[String] {
        self.outreach.notes()
    }

    pub fn position(&self) -> &NavigationPosition {
        &self.position
    }

    pub fn manual_notes(&self) -> &BTreeMap<usize, String> {
        &self.manual_notes
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.graph.get(self.position.current)
    }

    pub fn is_last_page(&self) -> bool {
        self.position.current + 1 == self.graph.len()
    }

    /// Visible fields of the current page
    pub fn visible_fields(&self) -> Vec<&Field> {
        match self.current_page() {
            Some(page) => visible_fields(page, &self.answers),
            None => Vec::new(),
        }
    }

    /// Current label of a field, or its name if the graph does not declare it
    pub fn label_of(&self, field: &str) -> String {
        match self.graph.field(field) {
            Some(f) => field_label(f, &self.answers),
            None => field.to_string(),
        }
    }

    /// Validate the current page
    pub fn validate(&self) -> ValidationResult {
        match self.current_page() {
            Some(page) => validate_page(page, &self.answers, self.outreach.unverifiable()),
            None => ValidationResult::success(),
        }
    }

    /// Whether "Next"/"Submit" is enabled. Recomputed on every call.
    pub fn can_proceed(&self) -> bool {
        match self.current_page() {
            Some(page) => is_page_satisfied(page, &self.answers, self.outreach.unverifiable()),
            None => false,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            step: self.position.current + 1,
            total: self.graph.len(),
        }
    }

    /// Label of the forward control for the current page
    pub fn next_label(&self) -> &'static str {
        let Some(page) = self.current_page() else {
            return "Next";
        };
        if page.id == self.branches.provider_type_handoff_page {
            "Continue to Provider Type Selection"
        } else if self.is_last_page() {
            "Submit"
        } else if page.is_completion_page {
            "Complete"
        } else {
            "Next"
        }
    }

    // ===== ANSWERS =====

    /// Record an answer.
    ///
    /// Tracked fields are mirrored into the provider currently enrolling.
    pub fn set_answer(&mut self, field: &str, value: impl Into<AnswerValue>) {
        let value = value.into();
        if let Some(index) = self.position.enrolling {
            if self.graph.is_tracked(field) {
                self.ledger.sync_field(index, field, Some(&value));
                tracing::debug!(field, provider = index, "synced tracked field");
            }
        }
        self.answers.set(field, value);
    }

    /// Remove an answer entirely
    pub fn clear_answer(&mut self, field: &str) {
        if let Some(index) = self.position.enrolling {
            if self.graph.is_tracked(field) {
                self.ledger.sync_field(index, field, None);
            }
        }
        self.answers.remove(field);
    }

    // ===== NAVIGATION =====

    /// Advance from the current page.
    ///
    /// Requires the page to be satisfied. Leaving a designated page runs
    /// its branch instead of (or before) the ordinary forward scan; any
    /// prompt is resolved before state changes.
    pub async fn next<P: Prompter>(&mut self, prompter: &mut P) -> Transition {
        let graph = Arc::clone(&self.graph);
        let Some(page) = graph.get(self.position.current) else {
            return Transition::Stayed(StayReason::EndOfGraph);
        };
        if page.is_completion_page {
            return Transition::Stayed(StayReason::CompletionPage);
        }

        let validation = validate_page(page, &self.answers, self.outreach.unverifiable());
        if !validation.valid {
            return Transition::Stayed(StayReason::Incomplete(validation.missing));
        }

        if page.id == self.branches.verification_page {
            return self.leave_verification_page(prompter).await;
        }
        if page.id == self.branches.additional_providers_page
            && self
                .answers
                .is_text(&self.branches.additional_providers_field, "Yes")
        {
            return self.start_next_enrollment();
        }
        if page.id == self.branches.group_add_finish_page {
            self.finish_group_add();
        }

        self.advance_linear()
    }

    /// Step back to the previous visible page. Never validates.
    pub fn previous(&mut self) -> Transition {
        let from = self.position.current;
        let mut to = previous_visible_index(&self.graph, from, &self.answers);
        while let Some(index) = to.filter(|&i| self.is_detour_page(i)) {
            to = previous_visible_index(&self.graph, index, &self.answers);
        }
        match to {
            Some(to) => {
                self.position.current = to;
                tracing::debug!(from, to, "moved back");
                Transition::Moved { from, to }
            }
            None => Transition::Stayed(StayReason::StartOfGraph),
        }
    }

    /// Ordinary forward scan to the next visible page
    pub(super) fn advance_linear(&mut self) -> Transition {
        let from = self.position.current;
        let mut to = next_visible_index(&self.graph, from, &self.answers);
        while let Some(index) = to.filter(|&i| self.is_detour_page(i)) {
            to = next_visible_index(&self.graph, index, &self.answers);
        }
        match to {
            Some(to) => {
                self.position.commit(to);
                tracing::debug!(from, to, "advanced");
                Transition::Moved { from, to }
            }
            None => Transition::Stayed(StayReason::EndOfGraph),
        }
    }

    /// Detour targets are entered only through their branch, never by
    /// scanning past them
    fn is_detour_page(&self, index: usize) -> bool {
        self.graph.get(index).is_some_and(|page| {
            page.id == self.branches.outreach_completion_page
                || page.id == self.branches.duplicate_rejection_page
        })
    }

    /// Move to a page by id. A missing page leaves the position unchanged.
    pub fn jump_to(&mut self, id: &str) -> Transition {
        let from = self.position.current;
        match self.graph.index_of(id) {
            Some(to) => {
                self.position.commit(to);
                tracing::debug!(from, to, page = id, "jumped");
                Transition::Moved { from, to }
            }
            None => {
                tracing::warn!(page = id, "target page not found, staying put");
                Transition::Stayed(StayReason::MissingPage(id.to_string()))
            }
        }
    }

    /// Submit the last page.
    ///
    /// Returns true if the page was satisfied and the confirmation shown.
    pub async fn submit<P: Prompter>(&mut self, prompter: &mut P) -> bool {
        if !self.is_last_page() || !self.can_proceed() {
            return false;
        }
        tracing::info!(answers = self.answers.len(), "walkthrough submitted");
        prompter.alert(SUBMITTED_MESSAGE).await;
        true
    }

    // ===== OUTREACH =====

    /// Flag or unflag a field as unverifiable.
    ///
    /// Flagging asks the operator to confirm the derived note first; a
    /// declined prompt changes nothing.
    pub async fn toggle_unverifiable<P: Prompter>(
        &mut self,
        field: &str,
        prompter: &mut P,
    ) -> ToggleOutcome {
        if self.outreach.is_unverifiable(field) {
            self.outreach.unmark(field);
            tracing::debug!(field, "unverifiable flag removed");
            return ToggleOutcome::Unmarked;
        }
        if self.graph.field(field).is_none() {
            return ToggleOutcome::UnknownField;
        }

        let label = self.label_of(field);
        let note = unverifiable_note(&label);
        if !prompter.confirm(&format!("Add outreach note: {}", note)).await {
            return ToggleOutcome::Cancelled;
        }
        self.outreach.mark(field, &label);
        tracing::info!(field, "marked unable to verify");
        ToggleOutcome::Marked { note }
    }

    /// Remove an outreach note by index
    pub fn remove_note(&mut self, index: usize) -> Option<String> {
        self.outreach.remove_note(index)
    }

    // ===== PROVIDERS =====

    /// Set or clear the free-text note for a provider.
    ///
    /// Returns false if no provider exists at `index`.
    pub fn set_manual_note(&mut self, index: usize, text: &str) -> bool {
        if self.ledger.get(index).is_none() {
            return false;
        }
        if text.trim().is_empty() {
            self.manual_notes.remove(&index);
        } else {
            self.manual_notes.insert(index, text.to_string());
        }
        true
    }

    /// Start over with empty state on the first page
    pub fn restart(&mut self) {
        self.answers = AnswerSet::new();
        self.ledger = ProviderLedger::new();
        self.outreach.clear();
        self.position = NavigationPosition::default();
        self.manual_notes.clear();
        tracing::info!("walkthrough restarted");
    }
}
