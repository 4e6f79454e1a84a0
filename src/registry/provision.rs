use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ProvisioningError, ProvisioningErrorKind};
use crate::model::{PathSet, ProvisioningReport};

/// Creates every directory of `paths` that does not exist yet.
///
/// Each directory is handled on its own: a failure is recorded in the
/// report and the remaining directories are still attempted.
pub fn ensure_directories(paths: &PathSet) -> ProvisioningReport {
    let mut report = ProvisioningReport::default();

    for dir in required_directories(paths) {
        match ensure_one(&dir) {
            Ok(true) => {
                debug!(path = %dir.display(), "created directory");
                report.created.push(dir);
            }
            Ok(false) => report.existing.push(dir),
            Err(failure) => {
                warn!(
                    path = %failure.path.display(),
                    kind = ?failure.kind,
                    detail = %failure.detail,
                    "directory provisioning failed"
                );
                report.failures.push(failure);
            }
        }
    }

    report
}

/// Directories to provision, parents before children, without duplicates.
pub fn required_directories(paths: &PathSet) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    let mut push = |path: &Path| {
        if !dirs.iter().any(|known| known == path) {
            dirs.push(path.to_path_buf());
        }
    };

    for (_, path) in paths.top_level() {
        push(path);
    }

    for language in &paths.languages {
        for (_, path) in language.directories() {
            push(path);
        }
        for (_, file) in language.files() {
            if let Some(parent) = file.parent() {
                push(parent);
            }
        }
    }

    dirs
}

/// Returns `Ok(true)` when the directory was created, `Ok(false)` when it already existed.
fn ensure_one(dir: &Path) -> Result<bool, ProvisioningError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => return Ok(false),
        Ok(_) => {
            return Err(ProvisioningError {
                path: dir.to_path_buf(),
                kind: ProvisioningErrorKind::NotADirectory,
                detail: "path exists and is not a directory".to_string(),
            });
        }
        Err(_) => {}
    }

    fs::create_dir_all(dir).map_err(|err| ProvisioningError {
        path: dir.to_path_buf(),
        kind: classify_failure(dir, &err),
        detail: err.to_string(),
    })?;

    Ok(true)
}

fn classify_failure(dir: &Path, err: &io::Error) -> ProvisioningErrorKind {
    let blocked_by_file = dir
        .ancestors()
        .skip(1)
        .any(|ancestor| ancestor.exists() && !ancestor.is_dir());
    if blocked_by_file {
        return ProvisioningErrorKind::NotADirectory;
    }

    match err.kind() {
        io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
            ProvisioningErrorKind::PermissionDenied
        }
        io::ErrorKind::NotADirectory => ProvisioningErrorKind::NotADirectory,
        _ => ProvisioningErrorKind::Io,
    }
}
