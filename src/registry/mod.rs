//! The corpus registry core: path layout, provisioning, normalization,
//! verification and loading of per-language database files.
//!
//! [`CorpusRegistry`] is the entry point for callers; the submodules hold the
//! individual stages and can be used on their own.

use std::path::{Path, PathBuf};

use crate::config::RegistryConfig;
use crate::error::Result;
use crate::model::{
    CorpusSnapshot, Domain, LanguageSet, OutputFiles, PathSet, ProvisioningReport,
    VerificationReport,
};

pub mod database;
pub mod load;
pub mod normalize;
pub mod paths;
pub mod provision;
pub mod verify;

pub use load::load_all;
pub use normalize::{RawPayload, document_count, normalize};
pub use paths::{output_files, resolve};
pub use provision::ensure_directories;
pub use verify::verify;

/// Registry bound to one base directory, one active domain and one language set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRegistry {
    base_dir: PathBuf,
    domain: Domain,
    languages: LanguageSet,
}

impl CorpusRegistry {
    pub fn new<S: AsRef<str>>(
        base_dir: impl Into<PathBuf>,
        domain: &str,
        languages: &[S],
    ) -> Result<Self> {
        Ok(Self {
            base_dir: base_dir.into(),
            domain: Domain::parse(domain)?,
            languages: LanguageSet::parse(languages)?,
        })
    }

    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        Self::new(
            config.base_dir.clone(),
            &config.domain,
            config.languages.as_slice(),
        )
    }

    /// Same base directory and languages, different domain.
    pub fn with_domain(&self, domain: &str) -> Result<Self> {
        Ok(Self {
            base_dir: self.base_dir.clone(),
            domain: Domain::parse(domain)?,
            languages: self.languages.clone(),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    pub fn resolve(&self) -> PathSet {
        paths::resolve_validated(&self.base_dir, &self.domain, &self.languages)
    }

    pub fn output_files(&self) -> OutputFiles {
        output_files(&self.resolve())
    }

    pub fn provision(&self) -> ProvisioningReport {
        ensure_directories(&self.resolve())
    }

    pub fn verify(&self) -> VerificationReport {
        verify(&self.resolve())
    }

    pub fn load_all(&self) -> CorpusSnapshot {
        load_all(&self.resolve())
    }
}
