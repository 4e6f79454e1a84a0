use std::io::{self, BufWriter, Write};

use anyhow::Result;
use serde::Serialize;

use crate::cli::ReportArgs;
use crate::commands::Context;
use crate::model::{OutputFiles, PathSet};
use crate::util::print_json;

#[derive(Debug, Serialize)]
struct PathsResponse {
    paths: PathSet,
    outputs: OutputFiles,
}

pub fn run(ctx: &Context, args: &ReportArgs) -> Result<()> {
    let paths = ctx.registry.resolve();
    let outputs = ctx.registry.output_files();

    if args.json {
        return print_json(&PathsResponse { paths, outputs });
    }

    let mut output = BufWriter::new(io::stdout().lock());
    writeln!(output, "Domain: {}", paths.domain)?;
    for (role, path) in paths.top_level() {
        writeln!(output, "  {role:<18} {}", path.display())?;
    }
    for language in &paths.languages {
        writeln!(output, "Language: {}", language.language)?;
        for (role, path) in language.directories().into_iter().chain(language.files()) {
            writeln!(output, "  {role:<18} {}", path.display())?;
        }
    }
    writeln!(output, "Outputs:")?;
    for path in [
        &outputs.document_vectors,
        &outputs.section_vectors,
        &outputs.paragraph_vectors,
        &outputs.clusters_multilingual,
        &outputs.knowledge_graph,
    ] {
        writeln!(output, "  {}", path.display())?;
    }
    output.flush()?;
    Ok(())
}
