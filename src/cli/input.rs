//! Parsing of walkthrough commands typed at the prompt

/// One operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkCommand {
    Set { field: String, value: String },
    Check { field: String },
    Clear { field: String },
    Unverify { field: String },
    Next,
    Back,
    Notes,
    /// 1-based note number
    RemoveNote(usize),
    Providers,
    /// 1-based provider number; empty text clears the note
    ManualNote { provider: usize, text: String },
    Resume(usize),
    AddToGroup(usize),
    Export,
    Restart,
    Help,
    Quit,
}

/// Split off the first whitespace-delimited word
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(at) => (&input[..at], input[at..].trim_start()),
        None => (input, ""),
    }
}

fn field_arg(command: &str, rest: &str) -> Result<String, String> {
    let (field, extra) = split_word(rest);
    if field.is_empty() {
        return Err(format!("usage: {} <field>", command));
    }
    if !extra.is_empty() {
        return Err(format!("{} takes a single field name", command));
    }
    Ok(field.to_string())
}

fn number_arg(command: &str, text: &str) -> Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("usage: {} <number>, counting from 1", command)),
    }
}

/// Parse one input line.
///
/// Returns `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<WalkCommand>, String> {
    let (word, rest) = split_word(line.trim());
    let command = match word.to_lowercase().as_str() {
        "" => return Ok(None),
        "set" => {
            let (field, value) = split_word(rest);
            if field.is_empty() || value.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            WalkCommand::Set {
                field: field.to_string(),
                value: value.trim_end().to_string(),
            }
        }
        "check" => WalkCommand::Check {
            field: field_arg("check", rest)?,
        },
        "clear" => WalkCommand::Clear {
            field: field_arg("clear", rest)?,
        },
        "unverify" => WalkCommand::Unverify {
            field: field_arg("unverify", rest)?,
        },
        "next" | "n" => WalkCommand::Next,
        "back" | "b" => WalkCommand::Back,
        "notes" => WalkCommand::Notes,
        "remove-note" => WalkCommand::RemoveNote(number_arg("remove-note", rest)?),
        "providers" => WalkCommand::Providers,
        "manual-note" => {
            let (number, text) = split_word(rest);
            WalkCommand::ManualNote {
                provider: number_arg("manual-note", number)?,
                text: text.trim_end().to_string(),
            }
        }
        "resume" => WalkCommand::Resume(number_arg("resume", rest)?),
        "add-to-group" => WalkCommand::AddToGroup(number_arg("add-to-group", rest)?),
        "export" => WalkCommand::Export,
        "restart" => WalkCommand::Restart,
        "help" | "?" => WalkCommand::Help,
        "quit" | "exit" | "q" => WalkCommand::Quit,
        other => return Err(format!("unknown command '{}', type 'help'", other)),
    };
    Ok(Some(command))
}

/// Interpret a yes/no reply. `None` if the reply is neither.
pub fn parse_yes_no(reply: &str) -> Option<bool> {
    match reply.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

pub const HELP: &str = "\
Commands:
  set <field> <value>      answer a text or radio field
  check <field>            tick or untick a checkbox
  clear <field>            remove an answer
  unverify <field>         mark or unmark a field as unable to verify
  next | back              move forward or back (next submits on the last page)
  notes                    list outreach notes
  remove-note <n>          remove outreach note n
  providers                list recorded providers
  manual-note <n> <text>   set the manual note of provider n (no text clears it)
  resume <n>               resume enrolling provider n
  add-to-group <n>         start adding provider n to the group
  export                   write the three reports
  restart                  start a new walkthrough
  help | quit";
