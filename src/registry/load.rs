use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::model::{CorpusSnapshot, LanguageReport, LanguageStatus, PathSet};
use crate::registry::database::{failure_status, read_payload};
use crate::registry::normalize::normalize;

/// Loads and normalizes every language database of `paths`.
///
/// Languages that are missing or malformed are left out of the collections
/// and reported through `CorpusSnapshot::statuses`.
pub fn load_all(paths: &PathSet) -> CorpusSnapshot {
    let mut statuses = Vec::with_capacity(paths.languages.len());
    let mut collections = BTreeMap::new();

    for language_paths in &paths.languages {
        let language = &language_paths.language;
        let status = match read_payload(&language_paths.database)
            .and_then(|payload| normalize(&payload))
        {
            Ok(collection) => {
                let documents = collection.len();
                debug!(language = %language, documents, "database loaded");
                collections.insert(language.clone(), collection);
                LanguageStatus::Ok { documents }
            }
            Err(err) => {
                warn!(
                    language = %language,
                    path = %language_paths.database.display(),
                    error = %err,
                    "skipping language"
                );
                failure_status(&err)
            }
        };

        statuses.push(LanguageReport {
            language: language.clone(),
            database: language_paths.database.clone(),
            status,
        });
    }

    CorpusSnapshot::new(paths.domain.clone(), statuses, collections)
}
