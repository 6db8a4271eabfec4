//! Backend health check.

use hrms_core::{HealthStatus, Service};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(service: &Service, global: &GlobalOpts) -> Result<(), CliError> {
    let status = service.health().await?;
    let color = output::should_color(&global.color);
    let url = service.config().url.to_string();

    let out = output::render_single(
        &global.output,
        &status,
        |s: &HealthStatus| {
            let line = format!("{url}  {}", s.status);
            if s.status.eq_ignore_ascii_case("healthy") {
                output::good(&line, color)
            } else {
                output::bad(&line, color)
            }
        },
        |s| s.status.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
