use std::io::{self, BufWriter, Write};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::LoadArgs;
use crate::commands::{Context, status_line};
use crate::model::{CorpusSnapshot, Domain, LanguageReport};
use crate::util::{print_json, write_json_pretty};

/// Snapshot without the documents themselves.
#[derive(Debug, Serialize)]
struct LoadSummary<'a> {
    domain: &'a Domain,
    loaded_languages: usize,
    total_documents: usize,
    statuses: &'a [LanguageReport],
}

pub fn run(ctx: &Context, args: &LoadArgs) -> Result<()> {
    let snapshot = ctx.registry.load_all();

    info!(
        domain = %snapshot.domain,
        languages = snapshot.language_count(),
        documents = snapshot.total_documents,
        "corpus loaded"
    );

    if let Some(path) = &args.output {
        write_json_pretty(path, &snapshot)?;
        info!(path = %path.display(), "wrote corpus snapshot");
    }

    if args.json {
        return print_json(&summary(&snapshot));
    }

    let mut output = BufWriter::new(io::stdout().lock());
    writeln!(
        output,
        "Loaded corpus for domain {}",
        snapshot.domain.as_str().to_ascii_uppercase()
    )?;
    for entry in &snapshot.statuses {
        writeln!(output, "  {}", status_line(entry))?;
    }
    writeln!(
        output,
        "TOTAL: {} documents across {} languages",
        snapshot.total_documents,
        snapshot.language_count()
    )?;
    output.flush()?;
    Ok(())
}

fn summary(snapshot: &CorpusSnapshot) -> LoadSummary<'_> {
    LoadSummary {
        domain: &snapshot.domain,
        loaded_languages: snapshot.language_count(),
        total_documents: snapshot.total_documents,
        statuses: &snapshot.statuses,
    }
}
