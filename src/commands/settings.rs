use std::io::{self, Write};

use anyhow::{Context as _, Result};

use crate::cli::ReportArgs;
use crate::commands::Context;
use crate::util::print_json;

pub fn run(ctx: &Context, args: &ReportArgs) -> Result<()> {
    if args.json {
        return print_json(&ctx.config);
    }

    let rendered =
        toml::to_string_pretty(&ctx.config).context("failed to render settings as toml")?;
    let mut output = io::stdout().lock();
    output.write_all(rendered.as_bytes())?;
    output.flush()?;
    Ok(())
}
