use std::io::{self, BufWriter, Write};

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::InitArgs;
use crate::commands::Context;
use crate::commands::verify::{log_report, write_report};
use crate::model::{ProvisioningReport, VerificationReport};
use crate::util::print_json;

#[derive(Debug, Serialize)]
struct InitResponse {
    ready: bool,
    provisioning: ProvisioningReport,
    verification: VerificationReport,
}

pub fn run(ctx: &Context, args: &InitArgs) -> Result<()> {
    let languages = ctx
        .registry
        .languages()
        .iter()
        .map(|language| ctx.config.display_name(language))
        .collect::<Vec<_>>()
        .join(", ");
    let clustering = ctx
        .config
        .clustering
        .methods
        .iter()
        .map(|method| method.as_str())
        .collect::<Vec<_>>()
        .join(",");

    info!(
        domain = %ctx.registry.domain(),
        languages = %languages,
        model = %ctx.config.embedding.model_name,
        dimensions = ctx.config.embedding.dimensions,
        clustering = %clustering,
        base_dir = %ctx.registry.base_dir().display(),
        "initializing corpus project"
    );

    let provisioning = ctx.registry.provision();
    if !provisioning.is_complete() {
        warn!(
            failed = provisioning.failures.len(),
            "some directories could not be provisioned"
        );
    }

    let verification = ctx.registry.verify();
    log_report(&verification);
    let ready = verification.all_ok;

    if args.json {
        print_json(&InitResponse {
            ready,
            provisioning,
            verification,
        })?;
    } else {
        let mut output = BufWriter::new(io::stdout().lock());
        write_report(&mut output, &verification)?;
        if ready {
            writeln!(output, "All corpus files found, ready for processing.")?;
        } else {
            writeln!(output, "Some corpus files are missing or unreadable, check file paths.")?;
        }
        output.flush()?;
    }

    if args.strict && !ready {
        bail!(
            "corpus for domain '{}' is not ready",
            ctx.registry.domain()
        );
    }

    Ok(())
}
