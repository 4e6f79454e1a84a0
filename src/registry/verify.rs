use tracing::{debug, warn};

use crate::model::{LanguageReport, LanguageStatus, PathSet, VerificationReport};
use crate::registry::database::{failure_status, read_payload};
use crate::registry::normalize::document_count;

/// Checks every language database of `paths` without loading any documents.
///
/// A missing or corrupt file only affects its own language entry.
pub fn verify(paths: &PathSet) -> VerificationReport {
    let languages = paths
        .languages
        .iter()
        .map(|language_paths| {
            let status = match read_payload(&language_paths.database)
                .and_then(|payload| document_count(&payload))
            {
                Ok(documents) => {
                    debug!(
                        language = %language_paths.language,
                        documents,
                        "database verified"
                    );
                    LanguageStatus::Ok { documents }
                }
                Err(err) => {
                    warn!(
                        language = %language_paths.language,
                        path = %language_paths.database.display(),
                        error = %err,
                        "database not ready"
                    );
                    failure_status(&err)
                }
            };

            LanguageReport {
                language: language_paths.language.clone(),
                database: language_paths.database.clone(),
                status,
            }
        })
        .collect();

    VerificationReport::new(paths.domain.clone(), languages)
}
