//! Configuration and bootstrap layer for a multilingual document corpus.
//!
//! Resolves the on-disk layout of a domain, provisions its directories,
//! normalizes per-language database files into one canonical document
//! collection, and reports which languages are ready before any embedding
//! or clustering stage runs.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod util;

pub use config::RegistryConfig;
pub use error::{ProvisioningError, RegistryError};
pub use model::{
    CorpusSnapshot, DocumentCollection, DocumentRecord, Domain, Language, LanguageSet,
    LanguageStatus, PathSet, ProvisioningReport, VerificationReport,
};
pub use registry::CorpusRegistry;
