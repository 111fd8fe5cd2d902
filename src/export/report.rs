//! Plain-text report rendering
//!
//! Renders the provider ledger, outreach notes and manual notes into the
//! three downloadable reports. Rendering is pure; writing lives in the
//! parent module.

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::domain::{field_label, ProviderLedger, Session};
use crate::schemas::{PageGraph, ProviderRecord};

const RULE_WIDTH: usize = 80;

/// Everything a report reads, borrowed from a session
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub graph: &'a PageGraph,
    pub ledger: &'a ProviderLedger,
    pub outreach_notes: &'a [String],
    pub manual_notes: &'a BTreeMap<usize, String>,
    pub generated: DateTime<Local>,
}

impl<'a> ReportInput<'a> {
    pub fn from_session(session: &'a Session, generated: DateTime<Local>) -> Self {
        ReportInput {
            graph: session.graph(),
            ledger: session.ledger(),
            outreach_notes: session.outreach_notes(),
            manual_notes: session.manual_notes(),
            generated,
        }
    }
}

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn header(out: &mut String, title: &str, generated: &DateTime<Local>) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "Generated: {}", generated.format("%B %-d, %Y at %I:%M %p"));
    let _ = writeln!(out, "{}\n", heavy_rule());
}

fn footer(out: &mut String) {
    let _ = writeln!(out, "\n{}", heavy_rule());
    let _ = writeln!(out, "End of Report");
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Indent continuation lines of a multi-line note
fn indented(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join("\n  ")
}

fn provider_details(out: &mut String, graph: &PageGraph, index: usize, record: &ProviderRecord) {
    let _ = writeln!(out, "PROVIDER {}", index + 1);
    let _ = writeln!(out, "Status: {}\n", record.status);
    let _ = writeln!(out, "Enrollment Details:");
    for field in graph.tracked_fields() {
        let name = match &field.summary {
            Some(summary) => summary.clone(),
            None => field_label(field, &record.answers),
        };
        let _ = writeln!(out, "  \u{2022} {}: {}", name, yes_no(record.is_complete(&field.name)));
    }
}

fn numbered_notes(out: &mut String, notes: &[String]) {
    for (i, note) in notes.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, note);
    }
}

fn current_outreach_section(out: &mut String, notes: &[String]) {
    let _ = writeln!(out, "CURRENT OUTREACH NOTES ({})", notes.len());
    let _ = writeln!(out, "{}", light_rule());
    numbered_notes(out, notes);
    out.push('\n');
}

/// Full notes report: every provider, then the current outreach notes
pub fn render_notes(input: &ReportInput<'_>) -> String {
    let mut out = String::new();
    header(&mut out, "PROVIDER ENROLLMENT NOTES", &input.generated);

    if input.ledger.is_empty() {
        out.push_str("No providers enrolled yet.\n\n");
    } else {
        let _ = writeln!(out, "ENROLLED PROVIDERS ({} total)", input.ledger.len());
        let _ = writeln!(out, "{}\n", light_rule());

        for (index, record) in input.ledger.iter().enumerate() {
            provider_details(&mut out, input.graph, index, record);

            if let Some(note) = input.manual_notes.get(&index) {
                let _ = writeln!(out, "\nManual Notes:\n  {}", indented(note));
            }
            if !record.outreach_notes.is_empty() {
                out.push_str("\nOutreach Notes:\n");
                for (i, note) in record.outreach_notes.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", i + 1, note);
                }
            }
            let _ = writeln!(out, "\n{}\n", light_rule());
        }
    }

    if !input.outreach_notes.is_empty() {
        current_outreach_section(&mut out, input.outreach_notes);
    }

    footer(&mut out);
    out
}

/// Outreach notes only
pub fn render_outreach(input: &ReportInput<'_>) -> String {
    let mut out = String::new();
    header(&mut out, "OUTREACH NOTES", &input.generated);

    if input.outreach_notes.is_empty() {
        out.push_str("No outreach notes yet.\n\n");
    } else {
        current_outreach_section(&mut out, input.outreach_notes);
    }

    footer(&mut out);
    out
}

/// Providers with their details and manual notes
pub fn render_enrolled_providers(input: &ReportInput<'_>) -> String {
    let mut out = String::new();
    header(&mut out, "ENROLLED PROVIDERS REPORT", &input.generated);

    if input.ledger.is_empty() {
        out.push_str("No providers enrolled yet.\n\n");
    } else {
        out.push_str("PROVIDER MANUAL NOTES\n");
        let _ = writeln!(out, "{}\n", light_rule());

        for (index, record) in input.ledger.iter().enumerate() {
            provider_details(&mut out, input.graph, index, record);
            out.push('\n');
            match input.manual_notes.get(&index) {
                Some(note) => {
                    let _ = writeln!(out, "Manual Notes:\n  {}", indented(note));
                }
                None => out.push_str("Manual Notes: None\n"),
            }
            let _ = writeln!(out, "\n{}\n", light_rule());
        }
    }

    footer(&mut out);
    out
}
