//! Plain-text rendering of the session for the terminal

use std::fmt::Write;

use crate::domain::{field_label, field_options, page_description, Session, StayReason, Transition};
use crate::schemas::{AnswerValue, Field, FieldKind, PageMetadata, ResourceLink};

pub const HEADER: &str = "Group Change Walkthrough";

fn resource_line(out: &mut String, indent: &str, link: &ResourceLink) {
    let _ = writeln!(out, "{}-> {}: {}", indent, link.label, link.url);
}

fn metadata(out: &mut String, meta: &PageMetadata) {
    if let Some(text) = &meta.instruction_text {
        let _ = writeln!(out, "\n{}", text);
    }
    if let Some(text) = &meta.note_text {
        let _ = writeln!(out, "\n{}", text);
    }
    if let Some(text) = &meta.name_format_note {
        let _ = writeln!(out, "\nName format: {}", text);
    }
    if let Some(image) = &meta.display_image {
        let _ = writeln!(out, "(reference image: {})", image);
    }
    if !meta.page_notes.is_empty() {
        out.push_str("\nNotes:\n");
        for note in &meta.page_notes {
            let _ = writeln!(out, "  - {}", note);
        }
    }
    if let Some(text) = &meta.resource_text {
        let _ = writeln!(out, "\n{}", text);
    }
    for link in &meta.resources {
        resource_line(out, "  ", link);
    }
}

fn field_line(out: &mut String, session: &Session, field: &Field) {
    let answers = session.answers();
    let label = field_label(field, answers);
    let marker = if session.outreach().is_unverifiable(&field.name) {
        " [unable to verify]"
    } else {
        ""
    };
    let required = if field.required { "*" } else { "" };

    match field.kind {
        FieldKind::Checkbox => {
            let ticked = answers.get(&field.name) == Some(&AnswerValue::Flag(true));
            let _ = writeln!(
                out,
                "  [{}] {}{} ({}){}",
                if ticked { "x" } else { " " },
                label,
                required,
                field.name,
                marker
            );
        }
        FieldKind::Radio | FieldKind::Text => {
            let value = match answers.get(&field.name) {
                Some(AnswerValue::Text(text)) => text.clone(),
                Some(AnswerValue::Flag(flag)) => flag.to_string(),
                None => "-".to_string(),
            };
            let _ = writeln!(out, "  {}{} ({}): {}{}", label, required, field.name, value, marker);
            let options = field_options(field, answers);
            if !options.is_empty() {
                let _ = writeln!(out, "      options: {}", options.join(" / "));
            }
        }
    }

    for note in &field.helper_notes {
        let _ = writeln!(out, "      - {}", note);
    }
    for link in &field.resources {
        resource_line(out, "      ", link);
    }
}

/// The current page with its visible fields and controls
pub fn render_page(session: &Session) -> String {
    let mut out = String::new();
    let Some(page) = session.current_page() else {
        return "The walkthrough has no pages.\n".to_string();
    };

    let _ = writeln!(out, "\n{}", "=".repeat(60));
    let _ = writeln!(out, "{}  |  {}", HEADER, session.progress());
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "{}", page.title);
    let description = page_description(page, session.answers());
    if !description.is_empty() {
        let _ = writeln!(out, "{}", description);
    }
    metadata(&mut out, &page.metadata);

    let fields = session.visible_fields();
    if !fields.is_empty() {
        out.push('\n');
        for field in fields {
            field_line(&mut out, session, field);
        }
    }

    out.push('\n');
    if page.is_completion_page {
        out.push_str("Completion page: export, restart or quit.\n");
    } else {
        let state = if session.can_proceed() { "ready" } else { "incomplete" };
        let _ = writeln!(out, "[{}] ({})", session.next_label(), state);
    }
    if !session.outreach_notes().is_empty() {
        let _ = writeln!(out, "Outreach notes: {}", session.outreach_notes().len());
    }
    out
}

/// Numbered outreach notes
pub fn render_notes(session: &Session) -> String {
    let notes = session.outreach_notes();
    if notes.is_empty() {
        return "No outreach notes yet.\n".to_string();
    }
    let mut out = String::new();
    for (i, note) in notes.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, note);
    }
    out
}

/// Numbered providers with status and manual notes
pub fn render_providers(session: &Session) -> String {
    let ledger = session.ledger();
    if ledger.is_empty() {
        return "No providers enrolled yet.\n".to_string();
    }
    let position = session.position();
    let mut out = String::new();
    for (index, record) in ledger.iter().enumerate() {
        let role = if position.enrolling == Some(index) {
            " (enrolling)"
        } else if position.adding == Some(index) {
            " (adding to group)"
        } else {
            ""
        };
        let _ = writeln!(out, "{}. {}{}", index + 1, record.status, role);
        if let Some(note) = session.manual_notes().get(&index) {
            let _ = writeln!(out, "   manual note: {}", note);
        }
        for note in &record.outreach_notes {
            let _ = writeln!(out, "   outreach: {}", note);
        }
    }
    out
}

/// One-line description of a transition
pub fn describe_transition(session: &Session, transition: &Transition) -> String {
    let title = |index: usize| {
        session
            .graph()
            .get(index)
            .map(|p| p.title.clone())
            .unwrap_or_default()
    };
    match transition {
        Transition::Moved { to, .. } => format!("-> {}", title(*to)),
        Transition::Looped { .. } => {
            "Provider recorded. Verify the next provider on this page.".to_string()
        }
        Transition::Stayed(StayReason::Incomplete(missing)) => {
            format!("Cannot continue, still required: {}", missing.join(", "))
        }
        Transition::Stayed(reason) => format!("Staying here: {}", reason),
    }
}
