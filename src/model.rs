use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ProvisioningError, RegistryError};

// Domain and language codes become single path components.
static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("identifier pattern is a valid regex")
});

fn check_identifier(kind: &str, raw: &str) -> Result<String, RegistryError> {
    if raw.trim().is_empty() {
        return Err(RegistryError::InvalidConfiguration(format!(
            "{kind} must not be empty"
        )));
    }
    if !IDENTIFIER_PATTERN.is_match(raw) {
        return Err(RegistryError::InvalidConfiguration(format!(
            "{kind} '{raw}' must contain only ASCII letters, digits, '-' or '_'"
        )));
    }
    Ok(raw.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Domain(String);

impl Domain {
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        check_identifier("domain", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Domain {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Domain> for String {
    fn from(value: Domain) -> Self {
        value.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        check_identifier("language", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Language {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-empty, duplicate-free, ordered set of supported languages.
///
/// Order only drives display; lookups never depend on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanguageSet(Vec<Language>);

impl LanguageSet {
    pub fn new(languages: Vec<Language>) -> Result<Self, RegistryError> {
        if languages.is_empty() {
            return Err(RegistryError::InvalidConfiguration(
                "language set must not be empty".to_string(),
            ));
        }

        for (index, language) in languages.iter().enumerate() {
            if languages[..index].contains(language) {
                return Err(RegistryError::InvalidConfiguration(format!(
                    "language '{language}' is listed more than once"
                )));
            }
        }

        Ok(Self(languages))
    }

    pub fn parse<S: AsRef<str>>(codes: &[S]) -> Result<Self, RegistryError> {
        let languages = codes
            .iter()
            .map(|code| Language::parse(code.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(languages)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Language> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, language: &Language) -> bool {
        self.0.contains(language)
    }
}

impl<'a> IntoIterator for &'a LanguageSet {
    type Item = &'a Language;
    type IntoIter = std::slice::Iter<'a, Language>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguagePaths {
    pub language: Language,
    pub base: PathBuf,
    pub for_processing: PathBuf,
    pub submissions: PathBuf,
    pub processed: PathBuf,
    pub t9n_testing: PathBuf,
    pub database: PathBuf,
}

impl LanguagePaths {
    pub fn directories(&self) -> [(&'static str, &Path); 5] {
        [
            ("base", &self.base),
            ("for_processing", &self.for_processing),
            ("submissions", &self.submissions),
            ("processed", &self.processed),
            ("t9n_testing", &self.t9n_testing),
        ]
    }

    pub fn files(&self) -> [(&'static str, &Path); 1] {
        [("database", &self.database)]
    }
}

/// Every logical path of one domain, keyed by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSet {
    pub base_dir: PathBuf,
    pub domain: Domain,
    pub base: PathBuf,
    pub vectors: PathBuf,
    pub knowledge_graphs: PathBuf,
    pub visualizations: PathBuf,
    pub languages: Vec<LanguagePaths>,
}

impl PathSet {
    pub fn top_level(&self) -> [(&'static str, &Path); 4] {
        [
            ("base", &self.base),
            ("vectors", &self.vectors),
            ("knowledge_graphs", &self.knowledge_graphs),
            ("visualizations", &self.visualizations),
        ]
    }

    pub fn language(&self, language: &Language) -> Option<&LanguagePaths> {
        self.languages
            .iter()
            .find(|paths| &paths.language == language)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFiles {
    pub document_vectors: PathBuf,
    pub section_vectors: PathBuf,
    pub paragraph_vectors: PathBuf,
    pub clusters_multilingual: PathBuf,
    pub knowledge_graph: PathBuf,
}

/// Opaque document metadata. Only the identifier is ever looked at.
pub type DocumentRecord = serde_json::Value;

pub type DocumentCollection = BTreeMap<String, DocumentRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    Unreadable,
    InvalidJson,
    UnrecognizedSchema,
}

impl MalformedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unreadable => "unreadable",
            Self::InvalidJson => "invalid_json",
            Self::UnrecognizedSchema => "unrecognized_schema",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LanguageStatus {
    Ok {
        documents: usize,
    },
    Missing,
    Malformed {
        reason: MalformedReason,
        detail: String,
    },
}

impl LanguageStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok { .. } => "ok",
            Self::Missing => "missing",
            Self::Malformed { .. } => "malformed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageReport {
    pub language: Language,
    pub database: PathBuf,
    #[serde(flatten)]
    pub status: LanguageStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub domain: Domain,
    pub languages: Vec<LanguageReport>,
    pub all_ok: bool,
}

impl VerificationReport {
    pub fn new(domain: Domain, languages: Vec<LanguageReport>) -> Self {
        let all_ok = languages.iter().all(|entry| entry.status.is_ok());
        Self {
            domain,
            languages,
            all_ok,
        }
    }

    pub fn status(&self, language: &Language) -> Option<&LanguageStatus> {
        self.languages
            .iter()
            .find(|entry| &entry.language == language)
            .map(|entry| &entry.status)
    }

    pub fn ready_count(&self) -> usize {
        self.languages
            .iter()
            .filter(|entry| entry.status.is_ok())
            .count()
    }

    /// True when not a single language could be read and normalized.
    pub fn no_language_ready(&self) -> bool {
        self.ready_count() == 0
    }
}

/// Documents of every language that loaded, plus the status of every language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusSnapshot {
    pub domain: Domain,
    pub statuses: Vec<LanguageReport>,
    pub collections: BTreeMap<Language, DocumentCollection>,
    pub total_documents: usize,
}

impl CorpusSnapshot {
    pub fn new(
        domain: Domain,
        statuses: Vec<LanguageReport>,
        collections: BTreeMap<Language, DocumentCollection>,
    ) -> Self {
        let total_documents = collections.values().map(BTreeMap::len).sum();
        Self {
            domain,
            statuses,
            collections,
            total_documents,
        }
    }

    pub fn documents(&self, language: &Language) -> Option<&DocumentCollection> {
        self.collections.get(language)
    }

    pub fn language_count(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &LanguageReport> {
        self.statuses.iter().filter(|entry| !entry.status.is_ok())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisioningReport {
    pub created: Vec<PathBuf>,
    pub existing: Vec<PathBuf>,
    pub failures: Vec<ProvisioningError>,
}

impl ProvisioningReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn directory_count(&self) -> usize {
        self.created.len() + self.existing.len() + self.failures.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseEntry {
    pub language: String,
    pub path: String,
    pub bytes: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub domain: String,
    pub corpus_directory: String,
    pub database_count: usize,
    pub missing_languages: Vec<String>,
    pub unreadable_languages: Vec<String>,
    pub databases: Vec<DatabaseEntry>,
}
