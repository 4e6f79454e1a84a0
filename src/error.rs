use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::model::MalformedReason;

/// Errors raised by the registry core.
///
/// Only `InvalidConfiguration` and `Config` ever reach a caller of the
/// multi-language operations; the per-language variants are downgraded to
/// [`crate::model::LanguageStatus`] entries by the verifier and loader.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Bad domain or language input. No partial result is possible.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A settings file could not be read or parsed, or holds out-of-range values.
    #[error("config '{}': {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("database file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// The database file exists but could not be read or parsed as JSON.
    #[error("failed to read database {}: {detail}", path.display())]
    MalformedDatabase {
        path: PathBuf,
        reason: MalformedReason,
        detail: String,
    },

    /// The parsed payload matches none of the accepted shapes.
    #[error("unrecognized database schema: {shape}")]
    UnrecognizedSchema { shape: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningErrorKind {
    /// Some component of the path exists as a regular file.
    NotADirectory,
    PermissionDenied,
    Io,
}

/// A failure to provision one directory. Collected, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("failed to provision {}: {detail}", path.display())]
pub struct ProvisioningError {
    pub path: PathBuf,
    pub kind: ProvisioningErrorKind,
    pub detail: String,
}

pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
