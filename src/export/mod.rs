//! Export collaborator: text reports written to disk

mod report;

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::Session;
use crate::errors::Result;
use crate::fs::{self, ReportKind};

pub use report::{render_enrolled_providers, render_notes, render_outreach, ReportInput};

/// Render one report
pub fn render(kind: ReportKind, input: &ReportInput<'_>) -> String {
    match kind {
        ReportKind::Notes => render_notes(input),
        ReportKind::Outreach => render_outreach(input),
        ReportKind::EnrolledProviders => render_enrolled_providers(input),
    }
}

/// Write one report for the session into `dir`.
///
/// # Returns
/// The path of the written file
///
/// # Errors
/// * `Io` - If the directory or file cannot be written
pub fn export(session: &Session, kind: ReportKind, dir: &Path) -> Result<PathBuf> {
    let now = Local::now();
    let input = ReportInput::from_session(session, now);
    let path = kind.path(dir, now.date_naive());
    fs::write_text(&path, &render(kind, &input))?;
    tracing::info!(report = kind.prefix(), path = %path.display(), "report written");
    Ok(path)
}

/// Write all three reports into `dir`
pub fn export_all(session: &Session, dir: &Path) -> Result<Vec<PathBuf>> {
    [
        ReportKind::Notes,
        ReportKind::Outreach,
        ReportKind::EnrolledProviders,
    ]
    .into_iter()
    .map(|kind| export(session, kind, dir))
    .collect()
}
