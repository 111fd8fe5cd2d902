//! Provider ledger - the ordered record of providers in this application
//!
//! Records are appended and updated in place. They are never removed or
//! reordered, so an index stays valid for the whole session.

use crate::schemas::{AnswerSet, AnswerValue, ProviderRecord, ProviderStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderLedger {
    records: Vec<ProviderRecord>,
}

impl ProviderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning its index
    pub fn push(&mut self, record: ProviderRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&ProviderRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ProviderRecord] {
        &self.records
    }

    /// First record after `after` that is ready to enroll and whose
    /// captured `field` equals `value`.
    ///
    /// The search only looks ahead; with no starting index it scans from
    /// the beginning.
    pub fn find_ready_to_enroll(
        &self,
        after: Option<usize>,
        field: &str,
        value: &str,
    ) -> Option<usize> {
        let start = after.map_or(0, |i| i + 1);
        self.records
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, r)| {
                r.status == ProviderStatus::ReadyToEnroll && r.answers.is_text(field, value)
            })
            .map(|(i, _)| i)
    }

    /// Update the status of a record. Returns false if the index is unknown.
    pub fn set_status(&mut self, index: usize, status: ProviderStatus) -> bool {
        match self.records.get_mut(index) {
            Some(record) => {
                record.status = status;
                true
            }
            None => false,
        }
    }

    /// Mirror a tracked field into a record; `None` removes it
    pub fn sync_field(&mut self, index: usize, field: &str, value: Option<&AnswerValue>) {
        if let Some(record) = self.records.get_mut(index) {
            match value {
                Some(value) => record.answers.set(field, value.clone()),
                None => {
                    record.answers.remove(field);
                }
            }
        }
    }

    /// Mark the given progress flags incomplete on a record
    pub fn reset_fields(&mut self, index: usize, fields: &[String]) {
        if let Some(record) = self.records.get_mut(index) {
            for field in fields {
                record.answers.set(field.as_str(), false);
            }
        }
    }
}

/// Status of a provider whose verification just concluded.
///
/// Already-enrolled providers refine the base status by group membership;
/// any unverifiable field overrides everything.
pub fn verification_status(
    answers: &AnswerSet,
    already_enrolled_field: &str,
    in_group_field: &str,
    any_unverifiable: bool,
) -> ProviderStatus {
    if any_unverifiable {
        return ProviderStatus::RequiresOutreach;
    }
    if answers.is_text(already_enrolled_field, "Yes") {
        if answers.is_text(in_group_field, "Yes") {
            ProviderStatus::AlreadyInGroup
        } else {
            ProviderStatus::ReadyToAddToGroup
        }
    } else {
        ProviderStatus::ReadyToEnroll
    }
}
