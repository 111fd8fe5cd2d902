//! Config schema - branch points and output settings

use serde::{Deserialize, Serialize};

/// Designated pages and field sets that drive the branch points.
///
/// Defaults match the bundled group-change walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BranchConfig {
    /// Page whose exit runs the provider-verification checkpoint
    pub verification_page: String,

    /// Fields whose unverifiable flag routes a provider to outreach
    pub verification_fields: Vec<String>,

    /// Extra answers cleared when looping back for another provider
    pub verification_cleared_fields: Vec<String>,

    pub already_enrolled_field: String,

    pub in_group_field: String,

    /// Confirmation asked before leaving the verification page
    pub more_providers_prompt: String,

    pub outreach_completion_page: String,

    pub duplicate_rejection_page: String,

    pub duplicate_rejection_prompt: String,

    pub duplicate_rejection_note: String,

    /// Page whose exit (answered Yes) starts the next new provider
    pub additional_providers_page: String,

    pub additional_providers_field: String,

    pub enrollment_entry_page: String,

    pub enrollment_type_field: String,

    pub new_provider_value: String,

    pub existing_provider_value: String,

    /// Enrollment-progress flags reset on the record picked up next
    pub enrollment_reset_fields: Vec<String>,

    pub group_add_entry_page: String,

    /// Page whose exit marks the provider being added as complete
    pub group_add_finish_page: String,

    /// Page on which "Next" reads "Continue to Provider Type Selection"
    pub provider_type_handoff_page: String,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for BranchConfig {
    fn default() -> Self {
        BranchConfig {
            verification_page: "question-20".to_string(),
            verification_fields: strings(&[
                "ssnVerified",
                "dexSanctionsCheck",
                "dobVerified",
                "npiVerified",
                "licensesVerified",
                "doctorLicenseVerified",
            ]),
            verification_cleared_fields: strings(&[
                "question20Answered",
                "providerAlreadyEnrolled",
                "providerInGroup",
            ]),
            already_enrolled_field: "providerAlreadyEnrolled".to_string(),
            in_group_field: "providerInGroup".to_string(),
            more_providers_prompt: "Are there more providers to verify in this application?"
                .to_string(),
            outreach_completion_page: "question-20-unable-to-verify-completion".to_string(),
            duplicate_rejection_page: "duplicate-rejection-completion".to_string(),
            duplicate_rejection_prompt:
                "This provider is already enrolled and in the group. Reject this application as a duplicate?"
                    .to_string(),
            duplicate_rejection_note:
                "Application rejected as duplicate: provider already enrolled and in the group"
                    .to_string(),
            additional_providers_page: "additional-providers-check".to_string(),
            additional_providers_field: "additionalProvidersNeeded".to_string(),
            enrollment_entry_page: "create-enrollment".to_string(),
            enrollment_type_field: "providerEnrollmentType".to_string(),
            new_provider_value: "New Provider".to_string(),
            existing_provider_value: "Existing Provider".to_string(),
            enrollment_reset_fields: strings(&[
                "createEnrollmentComplete",
                "providerInfoComplete",
                "groupSpecialtiesChecked",
            ]),
            group_add_entry_page: "existing-provider-open-cics".to_string(),
            group_add_finish_page: "existing-provider-completion".to_string(),
            provider_type_handoff_page: "next-provider-ready-check".to_string(),
        }
    }
}

/// Main configuration for the walkthrough
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub branches: BranchConfig,

    /// Directory reports are written to
    #[serde(default = "default_report_dir")]
    pub report_dir: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_report_dir() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            branches: BranchConfig::default(),
            report_dir: ".".to_string(),
        }
    }
}
