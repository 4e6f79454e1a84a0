//! Project settings: where the corpus lives, which domain and languages are
//! active, and the parameters handed to downstream embedding and clustering
//! stages.
//!
//! Settings come from built-in defaults, optionally overlaid by a TOML file,
//! then by command-line overrides.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::model::{Domain, Language, LanguageSet};

pub const DEFAULT_CONFIG_FILE: &str = "corpus-registry.toml";
pub const DEFAULT_DOMAIN: &str = "gai";
pub const DEFAULT_LANGUAGES: [&str; 3] = ["eng", "esp", "zho"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub base_dir: PathBuf,
    /// Active domain.
    pub domain: String,
    /// Every domain kept on disk; each one is resolved independently.
    pub domains: Vec<String>,
    pub languages: Vec<String>,
    /// Optional display metadata. Languages without an entry fall back to their code.
    pub language_info: BTreeMap<String, LanguageInfo>,
    pub embedding: EmbeddingSettings,
    pub vectorization: VectorizationSettings,
    pub clustering: ClusteringSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageInfo {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbeddingSettings {
    pub model_name: String,
    pub trust_remote_code: bool,
    pub task: String,
    pub dimensions: usize,
    /// Characters per document passed to the model.
    pub max_text_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VectorizationSettings {
    pub document_vectors: bool,
    pub section_vectors: bool,
    pub paragraph_vectors: bool,
    pub batch_size: usize,
    pub show_progress: bool,
    pub verbose: bool,
    pub max_documents: Option<usize>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusteringMethod {
    Kmeans,
    Hierarchical,
    Dbscan,
}

impl ClusteringMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kmeans => "kmeans",
            Self::Hierarchical => "hierarchical",
            Self::Dbscan => "dbscan",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusteringSettings {
    pub methods: Vec<ClusteringMethod>,
    pub default_n_clusters: usize,
    pub min_cluster_size: usize,
    pub similarity_threshold: f64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            domain: DEFAULT_DOMAIN.to_string(),
            domains: vec![DEFAULT_DOMAIN.to_string()],
            languages: DEFAULT_LANGUAGES.iter().map(ToString::to_string).collect(),
            language_info: BTreeMap::from([
                (
                    "eng".to_string(),
                    LanguageInfo {
                        name: "English".to_string(),
                        code: "en".to_string(),
                    },
                ),
                (
                    "esp".to_string(),
                    LanguageInfo {
                        name: "Spanish".to_string(),
                        code: "es".to_string(),
                    },
                ),
            ]),
            embedding: EmbeddingSettings::default(),
            vectorization: VectorizationSettings::default(),
            clustering: ClusteringSettings::default(),
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model_name: "jinaai/jina-embeddings-v3".to_string(),
            trust_remote_code: true,
            task: "retrieval.passage".to_string(),
            dimensions: 1024,
            max_text_length: 10_000,
        }
    }
}

impl Default for VectorizationSettings {
    fn default() -> Self {
        Self {
            document_vectors: true,
            section_vectors: true,
            paragraph_vectors: true,
            batch_size: 16,
            show_progress: true,
            verbose: true,
            max_documents: None,
        }
    }
}

impl Default for ClusteringSettings {
    fn default() -> Self {
        Self {
            methods: vec![
                ClusteringMethod::Kmeans,
                ClusteringMethod::Hierarchical,
                ClusteringMethod::Dbscan,
            ],
            default_n_clusters: 8,
            min_cluster_size: 3,
            similarity_threshold: 0.7,
        }
    }
}

impl RegistryConfig {
    /// Loads settings from `path`, or from [`DEFAULT_CONFIG_FILE`] in the
    /// working directory when it exists, or falls back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load_from_file(default_path)
                } else {
                    debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// A relative `base_dir` in the file is taken relative to the file's directory.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| RegistryError::Config {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let mut config = Self::from_toml_str(&contents).map_err(|reason| RegistryError::Config {
            path: path.to_path_buf(),
            reason,
        })?;

        if config.base_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.base_dir = parent.join(&config.base_dir);
            }
        }

        debug!(path = %path.display(), base_dir = %config.base_dir.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, String> {
        toml::from_str(contents).map_err(|err| err.to_string())
    }

    /// Command-line values win over anything read from a file.
    pub fn apply_overrides(
        &mut self,
        base_dir: Option<PathBuf>,
        domain: Option<String>,
        languages: Vec<String>,
    ) {
        if let Some(base_dir) = base_dir {
            self.base_dir = base_dir;
        }
        if let Some(domain) = domain {
            self.domain = domain;
        }
        if !languages.is_empty() {
            self.languages = languages;
        }
    }

    pub fn validate(&self) -> Result<()> {
        Domain::parse(&self.domain)?;
        LanguageSet::parse(self.languages.as_slice())?;
        for domain in &self.domains {
            Domain::parse(domain)?;
        }

        let invalid = |reason: &str| Err(RegistryError::InvalidConfiguration(reason.to_string()));

        if self.embedding.dimensions == 0 {
            return invalid("embedding.dimensions must be greater than zero");
        }
        if self.embedding.max_text_length == 0 {
            return invalid("embedding.max_text_length must be greater than zero");
        }
        if self.vectorization.batch_size == 0 {
            return invalid("vectorization.batch_size must be greater than zero");
        }
        if self.vectorization.max_documents == Some(0) {
            return invalid("vectorization.max_documents must be greater than zero when set");
        }
        if self.clustering.methods.is_empty() {
            return invalid("clustering.methods must name at least one method");
        }
        if self.clustering.default_n_clusters == 0 || self.clustering.min_cluster_size == 0 {
            return invalid("clustering cluster counts must be greater than zero");
        }
        if !(0.0..=1.0).contains(&self.clustering.similarity_threshold) {
            return invalid("clustering.similarity_threshold must lie between 0 and 1");
        }

        Ok(())
    }

    /// The active domain followed by the other configured domains, without duplicates.
    pub fn all_domains(&self) -> Result<Vec<Domain>> {
        let mut domains = vec![Domain::parse(&self.domain)?];
        for raw in &self.domains {
            let domain = Domain::parse(raw)?;
            if !domains.contains(&domain) {
                domains.push(domain);
            }
        }
        Ok(domains)
    }

    pub fn language_info(&self, language: &Language) -> Option<&LanguageInfo> {
        self.language_info.get(language.as_str())
    }

    pub fn display_name(&self, language: &Language) -> String {
        self.language_info(language)
            .map(|info| info.name.clone())
            .unwrap_or_else(|| language.as_str().to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_three_language_project() {
        let config = RegistryConfig::default();
        assert_eq!(config.domain, "gai");
        assert_eq!(config.languages, vec!["eng", "esp", "zho"]);
        assert_eq!(config.embedding.dimensions, 1024);
        assert_eq!(config.vectorization.batch_size, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn display_name_falls_back_to_code_without_metadata() {
        let config = RegistryConfig::default();
        let eng = Language::parse("eng").unwrap();
        let zho = Language::parse("zho").unwrap();

        assert_eq!(config.display_name(&eng), "English");
        assert_eq!(config.display_name(&zho), "ZHO");
        assert!(config.language_info(&zho).is_none());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = RegistryConfig::from_toml_str(
            r#"
            domain = "wellness"
            languages = ["eng", "fra"]

            [language_info.fra]
            name = "French"
            code = "fr"

            [clustering]
            methods = ["kmeans"]
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.domain, "wellness");
        assert_eq!(config.languages, vec!["eng", "fra"]);
        assert_eq!(config.clustering.methods, vec![ClusteringMethod::Kmeans]);
        assert_eq!(config.clustering.default_n_clusters, 8);
        assert_eq!(config.embedding.model_name, "jinaai/jina-embeddings-v3");
        assert_eq!(
            config.display_name(&Language::parse("fra").unwrap()),
            "French"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RegistryConfig::from_toml_str("domian = \"gai\"").expect_err("typo");
        assert!(err.contains("domian"));
    }

    #[test]
    fn unknown_clustering_method_is_rejected() {
        assert!(RegistryConfig::from_toml_str("[clustering]\nmethods = [\"spectral\"]").is_err());
    }

    #[test]
    fn validate_rejects_bad_identifiers_and_ranges() {
        let mut config = RegistryConfig::default();
        config.domain = String::new();
        assert!(matches!(
            config.validate(),
            Err(RegistryError::InvalidConfiguration(_))
        ));

        let mut config = RegistryConfig::default();
        config.languages = vec!["eng".to_string(), "eng".to_string()];
        assert!(config.validate().is_err());

        let mut config = RegistryConfig::default();
        config.clustering.similarity_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = RegistryConfig::default();
        config.vectorization.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = RegistryConfig::default();
        config.apply_overrides(
            Some(PathBuf::from("/data")),
            Some("climate".to_string()),
            vec!["eng".to_string()],
        );
        assert_eq!(config.base_dir, PathBuf::from("/data"));
        assert_eq!(config.domain, "climate");
        assert_eq!(config.languages, vec!["eng"]);

        config.apply_overrides(None, None, Vec::new());
        assert_eq!(config.languages, vec!["eng"]);
    }

    #[test]
    fn all_domains_starts_with_active_domain() {
        let mut config = RegistryConfig::default();
        config.domain = "climate".to_string();
        config.domains = vec!["gai".to_string(), "climate".to_string()];
        let domains = config.all_domains().unwrap();
        let names: Vec<&str> = domains.iter().map(Domain::as_str).collect();
        assert_eq!(names, vec!["climate", "gai"]);
    }

    #[test]
    fn padded_domain_names_are_rejected_instead_of_duplicated() {
        let mut config = RegistryConfig::default();
        config.domains = vec![" gai".to_string()];

        assert!(matches!(
            config.validate(),
            Err(RegistryError::InvalidConfiguration(_))
        ));
        assert!(config.all_domains().is_err());

        config.domains = vec!["gai".to_string(), "gai".to_string()];
        assert_eq!(config.all_domains().unwrap().len(), 1);
    }

    #[test]
    fn relative_base_dir_is_anchored_at_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus-registry.toml");
        fs::write(&path, "base_dir = \"..\"\n").unwrap();

        let config = RegistryConfig::load_from_file(&path).unwrap();
        assert_eq!(config.base_dir, dir.path().join(".."));
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RegistryConfig::load(Some(&dir.path().join("absent.toml")))
            .expect_err("file does not exist");
        assert!(matches!(err, RegistryError::Config { .. }));
    }
}
