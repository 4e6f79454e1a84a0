use std::path::Path;

use crate::error::RegistryError;
use crate::model::{Domain, LanguagePaths, LanguageSet, OutputFiles, PathSet};

pub const CORPORA_DIR: &str = "corpora";
pub const VECTORS_DIR: &str = "vectors";
pub const VISUALIZATIONS_DIR: &str = "visualizations";
pub const KNOWLEDGE_GRAPHS_DIR: &str = "knowledge-graphs";
pub const FOR_PROCESSING_DIR: &str = "for-processing";
pub const SUBMISSIONS_DIR: &str = "submissions";
pub const PROCESSED_DIR: &str = "processed";
pub const T9N_TESTING_DIR: &str = "t9n-testing";

/// Validates raw identifiers and derives the full path layout of `domain`.
pub fn resolve<S: AsRef<str>>(
    base_dir: &Path,
    domain: &str,
    languages: &[S],
) -> Result<PathSet, RegistryError> {
    let domain = Domain::parse(domain)?;
    let languages = LanguageSet::parse(languages)?;
    Ok(resolve_validated(base_dir, &domain, &languages))
}

pub fn resolve_validated(base_dir: &Path, domain: &Domain, languages: &LanguageSet) -> PathSet {
    let base = base_dir.join(CORPORA_DIR).join(domain.as_str());
    let vectors = base.join(VECTORS_DIR);

    let languages = languages
        .iter()
        .map(|language| {
            let lang_dir = base.join(language.as_str());
            LanguagePaths {
                language: language.clone(),
                for_processing: lang_dir.join(FOR_PROCESSING_DIR),
                submissions: lang_dir.join(SUBMISSIONS_DIR),
                processed: lang_dir.join(PROCESSED_DIR),
                t9n_testing: lang_dir.join(T9N_TESTING_DIR),
                database: lang_dir.join(database_file_name(domain, language.as_str())),
                base: lang_dir,
            }
        })
        .collect();

    PathSet {
        base_dir: base_dir.to_path_buf(),
        domain: domain.clone(),
        knowledge_graphs: base.join(KNOWLEDGE_GRAPHS_DIR),
        visualizations: vectors.join(VISUALIZATIONS_DIR),
        vectors,
        base,
        languages,
    }
}

pub fn database_file_name(domain: &Domain, language: &str) -> String {
    format!("{domain}-{language}_corpus-database.json")
}

/// Generated artifacts written by downstream vectorization and clustering stages.
pub fn output_files(paths: &PathSet) -> OutputFiles {
    let domain = &paths.domain;
    OutputFiles {
        document_vectors: paths
            .vectors
            .join(format!("{domain}-corpus-document-vectors.json")),
        section_vectors: paths
            .vectors
            .join(format!("{domain}-corpus-section-vectors.json")),
        paragraph_vectors: paths
            .vectors
            .join(format!("{domain}-corpus-paragraph-vectors.json")),
        clusters_multilingual: paths
            .knowledge_graphs
            .join(format!("{domain}-multilingual-clusters.json")),
        knowledge_graph: paths
            .knowledge_graphs
            .join(format!("{domain}-multilingual.graphml")),
    }
}
