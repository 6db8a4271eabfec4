//! Clap derive structures for the `hrms` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of workspace crates so `build.rs` can render man pages from it.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hrms -- employee roster and attendance from the command line
#[derive(Debug, Parser)]
#[command(
    name = "hrms",
    version,
    about = "Manage HRMS Lite employees and attendance from the command line",
    long_about = "Client for the HRMS Lite REST service.\n\n\
        Employee IDs are checked for uniqueness before they are submitted,\n\
        and attendance is only marked for an employee resolved to exactly\n\
        one roster entry.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "HRMS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile), e.g. http://localhost:8000/api/
    #[arg(long, short = 'u', env = "HRMS_URL", global = true)]
    pub url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HRMS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "HRMS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "HRMS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Attendance status as accepted on the command line.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StatusArg {
    #[default]
    Present,
    Absent,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage employees and employee IDs
    #[command(alias = "emp", alias = "e")]
    Employees(EmployeesArgs),

    /// Mark and review attendance
    #[command(alias = "att", alias = "a")]
    Attendance(AttendanceArgs),

    /// Check that the backend is reachable
    Health,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EMPLOYEES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EmployeesArgs {
    #[command(subcommand)]
    pub command: EmployeesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EmployeesCommand {
    /// List employees
    #[command(alias = "ls")]
    List {
        /// Case-insensitive substring match on ID or name
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Add an employee (prompts for missing fields when interactive)
    Add {
        /// Employee ID; generated from the name when omitted
        #[arg(long)]
        id: Option<String>,

        /// Full name
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Email address
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Department
        #[arg(long, short = 'd')]
        department: Option<String>,
    },

    /// Delete an employee and their attendance records
    #[command(alias = "rm")]
    Delete {
        /// Employee ID (exact)
        employee_id: String,
    },

    /// Suggest an employee ID from a full name
    GenerateId {
        /// Full name, e.g. "John Doe"
        name: String,

        /// Also check the suggestion against the roster
        #[arg(long, short = 'c')]
        check: bool,
    },

    /// Check whether an employee ID is still free
    CheckId {
        /// Employee ID (case-sensitive)
        employee_id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ATTENDANCE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AttendanceArgs {
    #[command(subcommand)]
    pub command: AttendanceCommand,
}

#[derive(Debug, Subcommand)]
pub enum AttendanceCommand {
    /// Mark attendance for one employee
    Mark {
        /// Employee search text (ID or part of the name)
        employee: String,

        /// Date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Attendance status
        #[arg(long, short = 's', default_value = "present")]
        status: StatusArg,
    },

    /// List attendance records, newest first
    #[command(alias = "ls")]
    List {
        /// Only this employee (search text, resolved to one employee)
        #[arg(long, short = 'e')]
        employee: Option<String>,

        /// Earliest date, YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,

        /// Latest date, YYYY-MM-DD
        #[arg(long)]
        to: Option<String>,
    },

    /// Present/absent totals for one employee
    Summary {
        /// Employee search text (ID or part of the name)
        employee: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Config key: url, timeout, insecure, ca_cert, debounce_ms
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
