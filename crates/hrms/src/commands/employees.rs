//! Employee command handlers.

use std::sync::Arc;

use dialoguer::Input;
use serde::Serialize;
use tabled::Tabled;

use hrms_core::{Employee, EmployeeDraft, Service, ValidationState, idgen};

use crate::cli::{EmployeesArgs, EmployeesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

/// Fresh suggestions tried when a generated ID collides.
const MAX_GENERATE_ATTEMPTS: usize = 5;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Department")]
    department: String,
}

impl From<&Arc<Employee>> for EmployeeRow {
    fn from(e: &Arc<Employee>) -> Self {
        Self {
            id: e.employee_id.clone(),
            name: e.full_name.clone(),
            email: e.email.clone(),
            department: e.department.clone(),
        }
    }
}

fn detail(e: &Employee) -> String {
    [
        format!("ID:         {}", e.employee_id),
        format!("Name:       {}", e.full_name),
        format!("Email:      {}", e.email),
        format!("Department: {}", e.department),
    ]
    .join("\n")
}

/// An identifier plus, when checked, its availability.
#[derive(Serialize)]
struct IdReport {
    employee_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<ValidationState>,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &Service,
    args: EmployeesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        EmployeesCommand::List { search } => {
            let roster = service.roster().await?;
            let matches = roster.filter(search.as_deref().unwrap_or_default());
            let out = output::render_list(
                &global.output,
                &matches,
                |e| EmployeeRow::from(e),
                |e| e.employee_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EmployeesCommand::Add {
            id,
            name,
            email,
            department,
        } => {
            let full_name = field_or_prompt(name, "Full name")?;
            let email = field_or_prompt(email, "Email address")?;
            let department = field_or_prompt(department, "Department")?;
            add(service, id, full_name, email, department, global).await
        }

        EmployeesCommand::Delete { employee_id } => {
            if !util::confirm(
                &format!("Delete employee '{employee_id}' and all of their attendance?"),
                "employees delete",
                global.yes,
            )? {
                return Ok(());
            }
            service.delete_employee(&employee_id).await?;
            if !global.quiet {
                eprintln!("Employee '{employee_id}' deleted");
            }
            Ok(())
        }

        EmployeesCommand::GenerateId { name, check } => {
            let employee_id = idgen::generate(&name);
            let validation = if check {
                let validator = service.validator();
                Some(util::check_identifier(&validator, &employee_id, global).await)
            } else {
                None
            };
            let color = output::should_color(&global.color);
            let report = IdReport {
                employee_id,
                validation,
            };
            let out = output::render_single(
                &global.output,
                &report,
                |r| match &r.validation {
                    Some(state) => format!("{}  {}", r.employee_id, status_line(state, color)),
                    None => r.employee_id.clone(),
                },
                |r| r.employee_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EmployeesCommand::CheckId { employee_id } => {
            let validator = service.validator();
            let state = util::check_identifier(&validator, &employee_id, global).await;
            let color = output::should_color(&global.color);
            let out = output::render_single(
                &global.output,
                &state,
                |s| status_line(s, color),
                |s| plain_status(s).into(),
            );
            output::print_output(&out, global.quiet);

            match state {
                ValidationState::Taken { identifier } => Err(CliError::IdTaken { identifier }),
                ValidationState::Failed { message, .. } => {
                    Err(CliError::ConnectionFailed { message })
                }
                _ => Ok(()),
            }
        }
    }
}

// ── Add ─────────────────────────────────────────────────────────────

async fn add(
    service: &Service,
    id: Option<String>,
    full_name: String,
    email: String,
    department: String,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let id = id.map(|id| id.trim().to_owned());
    let generated = id.is_none();
    let mut employee_id = id.unwrap_or_else(|| idgen::generate(&full_name));

    let validator = service.validator();
    let mut state = util::check_identifier(&validator, &employee_id, global).await;

    // A generated ID is only a suggestion; draw again on collision.
    let mut attempts = 1;
    while generated && state.is_taken() && attempts < MAX_GENERATE_ATTEMPTS {
        tracing::debug!(%employee_id, "generated ID taken, drawing another");
        employee_id = idgen::generate(&full_name);
        state = util::check_identifier(&validator, &employee_id, global).await;
        attempts += 1;
    }
    validator.close();

    match &state {
        ValidationState::Taken { identifier } => {
            return Err(CliError::IdTaken {
                identifier: identifier.clone(),
            });
        }
        ValidationState::Failed { message, .. } if !global.quiet => {
            eprintln!("warning: could not verify employee ID ({message}); submitting anyway");
        }
        _ => {}
    }
    if generated && !global.quiet {
        eprintln!("Using generated employee ID: {employee_id}");
    }

    let draft = EmployeeDraft {
        employee_id,
        full_name,
        email,
        department,
    };
    let created = service.create_employee(&draft, &state).await?;

    if !global.quiet {
        eprintln!("Employee added successfully");
    }
    let out = output::render_single(&global.output, &created, detail, |e| {
        e.employee_id.clone()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Use the flag value, or prompt for it on an interactive terminal.
/// Non-interactive runs pass the gap on to form validation.
fn field_or_prompt(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None if util::is_interactive() => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(util::prompt_err),
        None => Ok(String::new()),
    }
}

// ── Status rendering ────────────────────────────────────────────────

fn status_line(state: &ValidationState, color: bool) -> String {
    let text = state.describe();
    match state {
        ValidationState::Available { .. } => output::good(&text, color),
        ValidationState::Taken { .. } | ValidationState::Failed { .. } => {
            output::bad(&text, color)
        }
        ValidationState::Idle | ValidationState::Pending { .. } => text,
    }
}

fn plain_status(state: &ValidationState) -> &'static str {
    match state {
        ValidationState::Idle => "idle",
        ValidationState::Pending { .. } => "pending",
        ValidationState::Available { .. } => "available",
        ValidationState::Taken { .. } => "taken",
        ValidationState::Failed { .. } => "failed",
    }
}
