use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::RegistryError;
use crate::model::{LanguageStatus, MalformedReason};

/// Reads and parses one language database file.
pub fn read_payload(path: &Path) -> Result<Value, RegistryError> {
    if !path.exists() {
        return Err(RegistryError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read(path).map_err(|err| RegistryError::MalformedDatabase {
        path: path.to_path_buf(),
        reason: MalformedReason::Unreadable,
        detail: err.to_string(),
    })?;

    serde_json::from_slice(&raw).map_err(|err| RegistryError::MalformedDatabase {
        path: path.to_path_buf(),
        reason: MalformedReason::InvalidJson,
        detail: format!("invalid JSON: {err}"),
    })
}

/// Downgrades a per-language failure into a report status.
pub fn failure_status(err: &RegistryError) -> LanguageStatus {
    match err {
        RegistryError::MissingFile { .. } => LanguageStatus::Missing,
        RegistryError::MalformedDatabase { reason, detail, .. } => LanguageStatus::Malformed {
            reason: *reason,
            detail: detail.clone(),
        },
        RegistryError::UnrecognizedSchema { .. } => LanguageStatus::Malformed {
            reason: MalformedReason::UnrecognizedSchema,
            detail: err.to_string(),
        },
        RegistryError::InvalidConfiguration(_) | RegistryError::Config { .. } => {
            unreachable!("reading a database never yields a configuration error: {err}")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn read_failures_map_to_their_statuses() {
        let dir = tempfile::tempdir().unwrap();

        let missing = read_payload(&dir.path().join("absent.json")).expect_err("absent");
        assert_eq!(failure_status(&missing), LanguageStatus::Missing);

        let unreadable = read_payload(dir.path()).expect_err("directory is not a file");
        assert!(matches!(
            failure_status(&unreadable),
            LanguageStatus::Malformed {
                reason: MalformedReason::Unreadable,
                ..
            }
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "[").unwrap();
        let invalid = read_payload(&broken).expect_err("truncated json");
        assert!(matches!(
            failure_status(&invalid),
            LanguageStatus::Malformed {
                reason: MalformedReason::InvalidJson,
                ..
            }
        ));

        let schema = RegistryError::UnrecognizedSchema {
            shape: "number".to_string(),
        };
        assert!(matches!(
            failure_status(&schema),
            LanguageStatus::Malformed {
                reason: MalformedReason::UnrecognizedSchema,
                ..
            }
        ));
    }
}
