//! Report path naming
//!
//! Reports are named by kind and the local date they were generated,
//! e.g. `outreach-notes-2024-08-20.txt`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// The three downloadable reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Every provider with tracked progress, manual and outreach notes
    Notes,
    Outreach,
    EnrolledProviders,
}

impl ReportKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ReportKind::Notes => "provider-enrollment-notes",
            ReportKind::Outreach => "outreach-notes",
            ReportKind::EnrolledProviders => "enrolled-providers",
        }
    }

    /// File name for a report generated on `date`
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("{}-{}.txt", self.prefix(), date.format("%Y-%m-%d"))
    }

    /// Path of the report inside `dir`
    pub fn path(&self, dir: &Path, date: NaiveDate) -> PathBuf {
        dir.join(self.file_name(date))
    }
}

/// Get the path to the full notes report.
pub fn notes_report_path(dir: &Path, date: NaiveDate) -> PathBuf {
    ReportKind::Notes.path(dir, date)
}

/// Get the path to the outreach notes report.
pub fn outreach_notes_path(dir: &Path, date: NaiveDate) -> PathBuf {
    ReportKind::Outreach.path(dir, date)
}

/// Get the path to the enrolled providers report.
pub fn enrolled_providers_path(dir: &Path, date: NaiveDate) -> PathBuf {
    ReportKind::EnrolledProviders.path(dir, date)
}
