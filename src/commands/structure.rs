use std::io::{self, Write};

use anyhow::Result;

use crate::commands::Context;
use crate::config::RegistryConfig;
use crate::model::PathSet;
use crate::registry::paths::{
    FOR_PROCESSING_DIR, KNOWLEDGE_GRAPHS_DIR, PROCESSED_DIR, SUBMISSIONS_DIR, T9N_TESTING_DIR,
    VECTORS_DIR, VISUALIZATIONS_DIR,
};
use crate::registry::output_files;

pub fn run(ctx: &Context) -> Result<()> {
    let rendered = render_structure(&ctx.config, &ctx.registry.resolve());
    let mut output = io::stdout().lock();
    output.write_all(rendered.as_bytes())?;
    output.flush()?;
    Ok(())
}

/// Text tree of the domain layout. Database files that exist are marked `[present]`.
pub fn render_structure(config: &RegistryConfig, paths: &PathSet) -> String {
    let mut lines = Vec::new();
    let domain = &paths.domain;
    let outputs = output_files(paths);

    lines.push(format!("{}/", paths.base_dir.display()));
    lines.push("└── corpora/".to_string());
    lines.push(format!("    └── {domain}/"));

    for language in &paths.languages {
        let name = config.display_name(&language.language);
        let marker = if language.database.is_file() {
            "[present]"
        } else {
            "[missing]"
        };
        let database = file_name(&language.database);

        lines.push(format!("        ├── {}/  ({name})", language.language));
        for dir in [
            FOR_PROCESSING_DIR,
            SUBMISSIONS_DIR,
            PROCESSED_DIR,
            T9N_TESTING_DIR,
        ] {
            lines.push(format!("        │   ├── {dir}/"));
        }
        lines.push(format!("        │   └── {database} {marker}"));
    }

    lines.push(format!("        ├── {VECTORS_DIR}/  (generated)"));
    for file in [
        &outputs.document_vectors,
        &outputs.section_vectors,
        &outputs.paragraph_vectors,
    ] {
        lines.push(format!("        │   ├── {}", file_name(file)));
    }
    lines.push(format!("        │   └── {VISUALIZATIONS_DIR}/"));
    lines.push(format!("        └── {KNOWLEDGE_GRAPHS_DIR}/  (generated)"));
    lines.push(format!("            ├── {}", file_name(&outputs.clusters_multilingual)));
    lines.push(format!("            └── {}", file_name(&outputs.knowledge_graph)));

    lines.push(String::new());
    lines.join("\n")
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
