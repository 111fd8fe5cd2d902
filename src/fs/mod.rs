//! File system utilities
//!
//! JSON and text file operations plus report path naming.

mod json;
mod paths;

pub use json::{read_json, write_json, write_text};
pub use paths::{
    enrolled_providers_path, notes_report_path, outreach_notes_path, ReportKind,
};
