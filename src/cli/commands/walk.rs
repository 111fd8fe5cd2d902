//! Walk command - interactive walkthrough on the terminal

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};

use crate::cli::console::Console;
use crate::cli::input::{parse_command, WalkCommand, HELP};
use crate::cli::render::{describe_transition, render_notes, render_page, render_providers};
use crate::config::{load_config, load_graph};
use crate::domain::{Session, ToggleOutcome};
use crate::errors::{Result, WalkthroughError};
use crate::export::export_all;
use crate::schemas::{AnswerValue, FieldKind};

/// Whether the command loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run a walkthrough on stdin/stdout
pub async fn run(graph: Option<&Path>, config: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let graph = load_graph(graph)?;
    if graph.is_empty() {
        return Err(WalkthroughError::ConfigError(
            "page graph has no pages".to_string(),
        ));
    }
    let out_dir = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.report_dir));

    tracing::info!(pages = graph.len(), "starting walkthrough");
    let mut session = Session::new(Arc::new(graph), config.branches);
    let mut console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    drive(&mut session, &mut console, &out_dir).await
}

/// Read and execute commands until `quit` or end of input
pub async fn drive<R, W>(
    session: &mut Session,
    console: &mut Console<R, W>,
    out_dir: &Path,
) -> Result<()>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    console.write(&render_page(session)).await?;
    loop {
        console.write("> ").await?;
        let Some(line) = console.read_line().await? else {
            tracing::debug!("input closed");
            return Ok(());
        };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                console.writeln(&message).await?;
                continue;
            }
        };
        if execute(command, session, console, out_dir).await? == Flow::Quit {
            return Ok(());
        }
    }
}

fn to_answer(session: &Session, field: &str, value: &str) -> AnswerValue {
    let is_checkbox = session
        .graph()
        .field(field)
        .is_some_and(|f| f.kind == FieldKind::Checkbox);
    if is_checkbox {
        AnswerValue::Flag(matches!(
            value.to_lowercase().as_str(),
            "true" | "yes" | "y" | "x"
        ))
    } else {
        AnswerValue::from(value)
    }
}

async fn execute<R, W>(
    command: WalkCommand,
    session: &mut Session,
    console: &mut Console<R, W>,
    out_dir: &Path,
) -> Result<Flow>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    match command {
        WalkCommand::Set { field, value } => {
            let value = to_answer(session, &field, &value);
            session.set_answer(&field, value);
            console.write(&render_page(session)).await?;
        }
        WalkCommand::Check { field } => {
            let ticked = session.answers().get(&field) == Some(&AnswerValue::Flag(true));
            session.set_answer(&field, !ticked);
            console.write(&render_page(session)).await?;
        }
        WalkCommand::Clear { field } => {
            session.clear_answer(&field);
            console.write(&render_page(session)).await?;
        }
        WalkCommand::Unverify { field } => {
            match session.toggle_unverifiable(&field, console).await {
                ToggleOutcome::Marked { note } => console.writeln(&format!("Added: {}", note)).await?,
                ToggleOutcome::Unmarked => console.writeln("Unable-to-verify mark removed").await?,
                ToggleOutcome::Cancelled => console.writeln("Cancelled").await?,
                ToggleOutcome::UnknownField => {
                    console.writeln(&format!("No field named '{}'", field)).await?
                }
            }
            console.write(&render_page(session)).await?;
        }
        WalkCommand::Next => {
            if session.is_last_page() {
                if !session.submit(console).await {
                    let missing = session.validate().missing.join(", ");
                    console
                        .writeln(&format!("Cannot submit, still required: {}", missing))
                        .await?;
                }
            } else {
                let transition = session.next(console).await;
                console.writeln(&describe_transition(session, &transition)).await?;
                console.write(&render_page(session)).await?;
            }
        }
        WalkCommand::Back => {
            let transition = session.previous();
            console.writeln(&describe_transition(session, &transition)).await?;
            console.write(&render_page(session)).await?;
        }
        WalkCommand::Notes => console.write(&render_notes(session)).await?,
        WalkCommand::RemoveNote(n) => match session.remove_note(n - 1) {
            Some(note) => console.writeln(&format!("Removed: {}", note)).await?,
            None => console.writeln(&format!("No note {}", n)).await?,
        },
        WalkCommand::Providers => console.write(&render_providers(session)).await?,
        WalkCommand::ManualNote { provider, text } => {
            if session.set_manual_note(provider - 1, &text) {
                console.writeln(&format!("Manual note for provider {} saved", provider)).await?;
            } else {
                console.writeln(&format!("No provider {}", provider)).await?;
            }
        }
        WalkCommand::Resume(n) => {
            let transition = session.resume_enrolling(n - 1);
            console.writeln(&describe_transition(session, &transition)).await?;
            console.write(&render_page(session)).await?;
        }
        WalkCommand::AddToGroup(n) => {
            let transition = session.resume_adding_to_group(n - 1);
            console.writeln(&describe_transition(session, &transition)).await?;
            console.write(&render_page(session)).await?;
        }
        WalkCommand::Export => match export_all(session, out_dir) {
            Ok(paths) => {
                for path in paths {
                    console.writeln(&format!("Wrote {}", path.display())).await?;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                console.writeln(&format!("Export failed: {}", e)).await?;
            }
        },
        WalkCommand::Restart => {
            session.restart();
            console.write(&render_page(session)).await?;
        }
        WalkCommand::Help => console.writeln(HELP).await?,
        WalkCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
