//! Session Driver - Line Commands as Input Events
//!
//! Each line is one UI event:
//!   set <field> <value>    type into a text field (value may be empty)
//!   check <field>          tick a checkbox
//!   uncheck <field>        clear a checkbox
//!   submit | reset | show | quit
//! Blank lines and lines starting with '#' are ignored.

use std::io::{BufRead, Write};

use crate::controller::{FormController, SubmitOutcome};
use crate::form::FieldInput;
use crate::notify::ConfirmationNotice;
use crate::render::FormView;
use crate::FormError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: String, value: String },
    Check { field: String, checked: bool },
    Submit,
    Reset,
    Show,
    Quit,
}

impl Command {
    /// Returns `Ok(None)` for lines that carry no command.
    pub fn parse(line: &str) -> Result<Option<Self>, FormError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match trimmed.split_once(' ') {
            Some((verb, rest)) => (verb, rest),
            None => (trimmed, ""),
        };

        let command = match verb {
            "set" => {
                let rest = rest.trim_start();
                let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(FormError::Session("set needs a field name".to_string()));
                }
                Command::Set { field: field.to_string(), value: value.to_string() }
            }
            "check" | "uncheck" => {
                let field = rest.trim();
                if field.is_empty() {
                    return Err(FormError::Session(format!("{} needs a field name", verb)));
                }
                Command::Check { field: field.to_string(), checked: verb == "check" }
            }
            "submit" => Command::Submit,
            "reset" => Command::Reset,
            "show" => Command::Show,
            "quit" | "exit" => Command::Quit,
            other => return Err(FormError::Session(format!("unknown command '{}'", other))),
        };
        Ok(Some(command))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub bad_commands: usize,
}

pub struct Session {
    form: FormController,
}

impl Session {
    pub fn new(form: FormController) -> Self {
        Self { form }
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Runs until `quit` or end of input. Command errors are reported to
    /// `out` and the session keeps going; only I/O on `out` aborts it.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<SessionSummary, FormError> {
        let mut summary = SessionSummary::default();

        for line in input.lines() {
            let line = line?;
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    summary.bad_commands += 1;
                    writeln!(out, "error: {}", e)?;
                    continue;
                }
            };

            tracing::debug!(?command, "session command");
            match command {
                Command::Set { field, value } => {
                    if let Err(e) = self.form.handle_change_named(&field, FieldInput::Text(value)) {
                        summary.bad_commands += 1;
                        writeln!(out, "error: {}", e)?;
                    }
                }
                Command::Check { field, checked } => {
                    if let Err(e) = self.form.handle_change_named(&field, FieldInput::Checked(checked)) {
                        summary.bad_commands += 1;
                        writeln!(out, "error: {}", e)?;
                    }
                }
                Command::Submit => {
                    let mut notice = ConfirmationNotice::new(&mut out);
                    match self.form.handle_submit(&mut notice)? {
                        SubmitOutcome::Accepted(_) => summary.accepted += 1,
                        SubmitOutcome::Rejected(_) => {
                            summary.rejected += 1;
                            writeln!(out, "{}", FormView::of(&self.form))?;
                        }
                    }
                }
                Command::Reset => self.form.reset_form(),
                Command::Show => writeln!(out, "{}", FormView::of(&self.form))?,
                Command::Quit => break,
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Field;

    #[test]
    fn test_parse_set_keeps_spaces_in_value() {
        let cmd = Command::parse("set name Jane  Doe").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Set { field: "name".to_string(), value: "Jane  Doe".to_string() }
        );
    }

    #[test]
    fn test_parse_set_without_value_clears_field() {
        let cmd = Command::parse("set guestName").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Set { field: "guestName".to_string(), value: String::new() }
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   # note").unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_unknown_verb() {
        assert!(matches!(Command::parse("delete name"), Err(FormError::Session(_))));
        assert!(matches!(Command::parse("check"), Err(FormError::Session(_))));
    }

    #[test]
    fn test_run_reports_bad_commands_and_continues() {
        let script = "set phone 555\ncheck name\nset name Jane Doe\nquit\nset name ignored\n";
        let mut session = Session::new(FormController::new());
        let mut out = Vec::new();
        let summary = session.run(script.as_bytes(), &mut out).unwrap();

        assert_eq!(summary.bad_commands, 2);
        assert_eq!(session.form().values().name, "Jane Doe");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("error: Unknown field: phone"));
        assert!(text.contains("error: Field name expects text input"));
    }

    #[test]
    fn test_run_rejected_then_accepted() {
        let script = "\
set name Jane Doe
set email jane@example.com
check attendingWithGuest
submit
set age 30
set guestName Sam Roe
submit
";
        let mut session = Session::new(FormController::new());
        let mut out = Vec::new();
        let summary = session.run(script.as_bytes(), &mut out).unwrap();

        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.accepted, 1);
        assert!(session.form().errors().is_empty());
        assert!(!session.form().values().attending_with_guest);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Age is required"));
        assert!(text.contains("Form submitted successfully!"));
        assert!(text.contains("\"guestName\": \"Sam Roe\""));
        assert!(!session.form().errors().contains(Field::Age));
    }
}
