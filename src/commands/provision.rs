use anyhow::Result;
use tracing::{info, warn};

use crate::cli::ReportArgs;
use crate::commands::Context;
use crate::util::print_json;

pub fn run(ctx: &Context, args: &ReportArgs) -> Result<()> {
    let report = ctx.registry.provision();

    for failure in &report.failures {
        warn!(
            path = %failure.path.display(),
            kind = ?failure.kind,
            detail = %failure.detail,
            "could not provision directory"
        );
    }
    info!(
        domain = %ctx.registry.domain(),
        created = report.created.len(),
        existing = report.existing.len(),
        failed = report.failures.len(),
        "provisioning completed"
    );

    if args.json {
        print_json(&report)?;
    }

    Ok(())
}
