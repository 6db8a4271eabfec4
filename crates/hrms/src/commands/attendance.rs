//! Attendance command handlers.
//!
//! Every command that targets one employee resolves the search text
//! through a `Selector` first; requests carry the committed employee's
//! ID, never the raw text.

use tabled::Tabled;

use hrms_core::{
    AttendanceDraft, AttendanceQuery, AttendanceRecord, AttendanceStatus, AttendanceSummary,
    Service,
};

use crate::cli::{AttendanceArgs, AttendanceCommand, GlobalOpts, StatusArg};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AttendanceRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Employee ID")]
    employee_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&AttendanceRecord> for AttendanceRow {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            date: r.date.to_string(),
            employee_id: r.employee_id.clone(),
            name: r.employee_name.clone().unwrap_or_default(),
            status: r.status.to_string(),
        }
    }
}

fn record_detail(r: &AttendanceRecord) -> String {
    format!(
        "{}  {}  {}",
        r.date,
        r.employee_name.as_deref().unwrap_or(&r.employee_id),
        r.status
    )
}

fn summary_detail(s: &AttendanceSummary) -> String {
    [
        format!("Employee: {} - {}", s.employee_id, s.employee_name),
        format!("Present:  {}", s.total_present),
        format!("Absent:   {}", s.total_absent),
        format!("Total:    {}", s.total_days),
    ]
    .join("\n")
}

fn status(arg: StatusArg) -> AttendanceStatus {
    match arg {
        StatusArg::Present => AttendanceStatus::Present,
        StatusArg::Absent => AttendanceStatus::Absent,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &Service,
    args: AttendanceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AttendanceCommand::Mark {
            employee,
            date,
            status: status_arg,
        } => {
            let mut draft = AttendanceDraft {
                status: status(status_arg),
                ..AttendanceDraft::default()
            };
            if let Some(ref date) = date {
                draft.date = util::parse_date("date", date)?;
            }

            let selector = util::resolve_employee(service, &employee, global).await?;
            let record = service.mark_attendance(&selector, &draft).await?;

            if !global.quiet {
                let name = selector
                    .require_selected()
                    .map(|e| e.full_name.clone())
                    .unwrap_or_else(|_| record.employee_id.clone());
                eprintln!("Attendance marked for {name}");
            }
            let out = output::render_single(&global.output, &record, record_detail, |r| {
                r.id.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AttendanceCommand::List { employee, from, to } => {
            let mut query = AttendanceQuery {
                start_date: from
                    .as_deref()
                    .map(|d| util::parse_date("from", d))
                    .transpose()?,
                end_date: to
                    .as_deref()
                    .map(|d| util::parse_date("to", d))
                    .transpose()?,
                ..AttendanceQuery::default()
            };
            if let Some(ref employee) = employee {
                let selector = util::resolve_employee(service, employee, global).await?;
                query.employee_id = selector.committed_employee_id().map(str::to_owned);
            }

            let records = service.attendance(&query).await?;
            let out = output::render_list(
                &global.output,
                &records,
                |r| AttendanceRow::from(r),
                |r| r.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AttendanceCommand::Summary { employee } => {
            let selector = util::resolve_employee(service, &employee, global).await?;
            let employee_id = selector.require_selected()?.employee_id.clone();

            let summary = service.attendance_summary(&employee_id).await?;
            let out = output::render_single(&global.output, &summary, summary_detail, |s| {
                format!("{} {} {}", s.total_present, s.total_absent, s.total_days)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
