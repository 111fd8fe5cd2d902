//! Outreach tracker - unverifiable fields and their notes
//!
//! Every flagged field owns exactly one derived note. The note text is
//! captured when the field is flagged, so removing it later does not
//! depend on the field's label at that time.

use std::collections::{BTreeMap, BTreeSet};

/// Prefix of the note derived from an unverifiable field
pub const UNVERIFIABLE_NOTE_PREFIX: &str = "Unable to verify: ";

/// Note text for a field that cannot be verified
pub fn unverifiable_note(label: &str) -> String {
    format!("{}{}", UNVERIFIABLE_NOTE_PREFIX, label)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutreachTracker {
    notes: Vec<String>,
    unverifiable: BTreeSet<String>,
    derived: BTreeMap<String, String>,
}

impl OutreachTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outreach notes in insertion order
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Fields currently flagged as unverifiable
    pub fn unverifiable(&self) -> &BTreeSet<String> {
        &self.unverifiable
    }

    pub fn is_unverifiable(&self, field: &str) -> bool {
        self.unverifiable.contains(field)
    }

    /// Whether any of `fields` is flagged
    pub fn any_unverifiable(&self, fields: &[String]) -> bool {
        fields.iter().any(|f| self.unverifiable.contains(f))
    }

    /// Flag a field and append its derived note.
    ///
    /// Returns false, changing nothing, if the field is already flagged.
    pub fn mark(&mut self, field: &str, label: &str) -> bool {
        if self.unverifiable.contains(field) {
            return false;
        }
        let note = unverifiable_note(label);
        self.notes.push(note.clone());
        self.unverifiable.insert(field.to_string());
        self.derived.insert(field.to_string(), note);
        true
    }

    /// Unflag a field and remove its derived note.
    ///
    /// Returns false if the field was not flagged.
    pub fn unmark(&mut self, field: &str) -> bool {
        if !self.unverifiable.remove(field) {
            return false;
        }
        if let Some(note) = self.derived.remove(field) {
            if let Some(pos) = self.notes.iter().rposition(|n| *n == note) {
                self.notes.remove(pos);
            }
        }
        true
    }

    /// Append a free-standing note
    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Remove the note at `index`.
    ///
    /// If it is the derived note of a flagged field, the field is unflagged
    /// as well.
    pub fn remove_note(&mut self, index: usize) -> Option<String> {
        if index >= self.notes.len() {
            return None;
        }
        let note = self.notes.remove(index);
        let owner = self
            .derived
            .iter()
            .find(|(_, derived)| **derived == note)
            .map(|(field, _)| field.clone());
        if let Some(field) = owner {
            self.derived.remove(&field);
            self.unverifiable.remove(&field);
        }
        Some(note)
    }

    /// Unflag every listed field, dropping their derived notes
    pub fn clear_fields(&mut self, fields: &[String]) {
        for field in fields {
            self.unmark(field);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
