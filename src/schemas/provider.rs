//! Provider record schema - per-provider progress snapshots

use serde::{Deserialize, Serialize};

use super::answers::{AnswerSet, AnswerValue};

/// Processing status of a provider.
///
/// Ordered by typical progression, not a strict total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderStatus {
    #[serde(rename = "Unable to Verify - Requires Outreach")]
    RequiresOutreach,
    #[serde(rename = "Verified - Ready to Enroll")]
    ReadyToEnroll,
    #[serde(rename = "Verified - Ready to Add to Group")]
    ReadyToAddToGroup,
    #[serde(rename = "Verified - Already in the Group")]
    AlreadyInGroup,
    #[serde(rename = "Enrolled - Ready to be Added to Group")]
    EnrolledReadyForGroup,
    #[serde(rename = "Complete - Enrolled and Added to Group")]
    Complete,
}

impl ProviderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderStatus::RequiresOutreach => "Unable to Verify - Requires Outreach",
            ProviderStatus::ReadyToEnroll => "Verified - Ready to Enroll",
            ProviderStatus::ReadyToAddToGroup => "Verified - Ready to Add to Group",
            ProviderStatus::AlreadyInGroup => "Verified - Already in the Group",
            ProviderStatus::EnrolledReadyForGroup => "Enrolled - Ready to be Added to Group",
            ProviderStatus::Complete => "Complete - Enrolled and Added to Group",
        }
    }
}

impl std::fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one provider, taken when its verification step concluded
/// and updated in place as the operator works through its sub-flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub status: ProviderStatus,

    /// Answers captured at verification time, plus tracked sub-flow fields
    pub answers: AnswerSet,

    /// Outreach notes active when the record was captured
    #[serde(default)]
    pub outreach_notes: Vec<String>,

    /// RFC 3339 capture timestamp
    pub captured_at: String,
}

impl ProviderRecord {
    pub fn new(status: ProviderStatus, answers: AnswerSet, outreach_notes: Vec<String>) -> Self {
        ProviderRecord {
            status,
            answers,
            outreach_notes,
            captured_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.answers.get(field)
    }

    /// Whether a tracked checkbox is complete for this provider
    pub fn is_complete(&self, field: &str) -> bool {
        self.answers.get(field).is_some_and(AnswerValue::is_truthy)
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new record with the given status
    pub fn with_status(mut self, status: ProviderStatus) -> Self {
        self.status = status;
        self
    }

    /// Return a new record with `field` set
    pub fn with_answer(mut self, field: &str, value: impl Into<AnswerValue>) -> Self {
        self.answers.set(field, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_to_display_string() {
        let statuses = [
            ProviderStatus::RequiresOutreach,
            ProviderStatus::ReadyToEnroll,
            ProviderStatus::ReadyToAddToGroup,
            ProviderStatus::AlreadyInGroup,
            ProviderStatus::EnrolledReadyForGroup,
            ProviderStatus::Complete,
        ];
        for status in statuses {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }

    #[test]
    fn test_status_deserialization() {
        let status: ProviderStatus =
            serde_json::from_str("\"Verified - Already in the Group\"").unwrap();
        assert_eq!(status, ProviderStatus::AlreadyInGroup);
    }

    #[test]
    fn test_record_builders() {
        let record = ProviderRecord::new(ProviderStatus::ReadyToEnroll, AnswerSet::new(), vec![]);
        let updated = record
            .clone()
            .with_status(ProviderStatus::EnrolledReadyForGroup)
            .with_answer("createEnrollmentComplete", true);

        assert_eq!(record.status, ProviderStatus::ReadyToEnroll); // Source record unchanged
        assert_eq!(updated.status, ProviderStatus::EnrolledReadyForGroup);
        assert!(updated.is_complete("createEnrollmentComplete"));
        assert!(!record.is_complete("createEnrollmentComplete"));
    }
}
