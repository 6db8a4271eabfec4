//! Command dispatch: bridges CLI args -> core Service -> output formatting.

pub mod attendance;
pub mod config_cmd;
pub mod employees;
pub mod health;
pub mod util;

use hrms_core::Service;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    service: &Service,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Employees(args) => employees::handle(service, args, global).await,
        Command::Attendance(args) => attendance::handle(service, args, global).await,
        Command::Health => health::handle(service, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal {
            message: "command does not need a backend connection".into(),
        }),
    }
}
