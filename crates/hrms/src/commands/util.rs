//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use chrono::NaiveDate;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};

use hrms_core::{CoreError, IdValidator, RosterSource, Selector, Service, ValidationState};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// `true` when both stdin and stderr are attached to a terminal.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !is_interactive() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Parse a `YYYY-MM-DD` flag value.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD, got '{value}'"),
    })
}

/// Run one identifier through the debounced validator and wait for it to
/// settle, with a spinner on interactive terminals.
pub async fn check_identifier<S: RosterSource>(
    validator: &IdValidator<S>,
    identifier: &str,
    global: &GlobalOpts,
) -> ValidationState {
    validator.on_identifier_change(identifier);

    let spinner = (!global.quiet && std::io::stderr().is_terminal()).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Checking employee ID \"{identifier}\"..."));
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    });

    let state = validator.settled().await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    state
}

/// Resolve free-text employee search to a single committed selection.
///
/// An unambiguous query is picked directly. When several employees match
/// and the session is interactive, the user picks from the candidates;
/// otherwise the ambiguity is reported as an error.
pub async fn resolve_employee(
    service: &Service,
    query: &str,
    global: &GlobalOpts,
) -> Result<Selector, CliError> {
    let mut selector = service.selector().await?;

    match selector.resolve_unique(query) {
        Ok(_) => Ok(selector),
        Err(CoreError::PreconditionNotMet { message }) => {
            let candidates = selector.candidates();
            if candidates.is_empty() || global.yes || !is_interactive() {
                return Err(CliError::Precondition { message });
            }

            let labels: Vec<String> = candidates.iter().map(|e| e.label()).collect();
            let picked = Select::new()
                .with_prompt(format!("\"{query}\" matches several employees"))
                .items(&labels)
                .default(0)
                .interact_opt()
                .map_err(prompt_err)?;

            match picked.and_then(|i| candidates.get(i)) {
                Some(employee) => {
                    selector.on_candidate_pick(employee.clone());
                    Ok(selector)
                }
                None => Err(CliError::Precondition {
                    message: hrms_core::selector::SELECTION_REQUIRED.into(),
                }),
            }
        }
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn dates_parse_iso_only() {
        assert_eq!(
            parse_date("date", "2024-06-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
        let err = parse_date("date", "15/06/2024").unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "date"));
    }
}
