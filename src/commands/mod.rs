use anyhow::{Context as _, Result};

use crate::cli::GlobalArgs;
use crate::config::RegistryConfig;
use crate::model::{LanguageReport, LanguageStatus};
use crate::registry::CorpusRegistry;

pub mod init;
pub mod inventory;
pub mod load;
pub mod paths;
pub mod provision;
pub mod settings;
pub mod structure;
pub mod verify;

/// Effective settings and the registry built from them, shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: RegistryConfig,
    pub registry: CorpusRegistry,
}

impl Context {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let mut config = RegistryConfig::load(args.config.as_deref())
            .context("failed to load registry settings")?;
        config.apply_overrides(
            args.base_dir.clone(),
            args.domain.clone(),
            args.languages.clone(),
        );
        Self::new(config)
    }

    pub fn new(config: RegistryConfig) -> Result<Self> {
        config.validate().context("invalid registry settings")?;
        let registry = CorpusRegistry::from_config(&config)?;
        Ok(Self { config, registry })
    }
}

/// One console line per language, e.g. `ENG  ok  12 documents`.
pub(crate) fn status_line(entry: &LanguageReport) -> String {
    let code = entry.language.as_str().to_ascii_uppercase();
    match &entry.status {
        LanguageStatus::Ok { documents } => format!("{code}  ok  {documents} documents"),
        LanguageStatus::Missing => {
            format!("{code}  missing  {}", entry.database.display())
        }
        LanguageStatus::Malformed { reason, detail } => {
            format!("{code}  malformed ({})  {detail}", reason.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::model::{Language, MalformedReason};

    fn report(status: LanguageStatus) -> LanguageReport {
        LanguageReport {
            language: Language::parse("esp").unwrap(),
            database: PathBuf::from("corpora/gai/esp/gai-esp_corpus-database.json"),
            status,
        }
    }

    #[test]
    fn status_line_renders_each_status() {
        assert_eq!(
            status_line(&report(LanguageStatus::Ok { documents: 4 })),
            "ESP  ok  4 documents"
        );
        assert_eq!(
            status_line(&report(LanguageStatus::Missing)),
            "ESP  missing  corpora/gai/esp/gai-esp_corpus-database.json"
        );
        assert_eq!(
            status_line(&report(LanguageStatus::Malformed {
                reason: MalformedReason::InvalidJson,
                detail: "invalid JSON: EOF".to_string(),
            })),
            "ESP  malformed (invalid_json)  invalid JSON: EOF"
        );
    }

    #[test]
    fn context_rejects_invalid_settings() {
        let mut config = RegistryConfig::default();
        config.languages.clear();
        assert!(Context::new(config).is_err());
    }

    #[test]
    fn context_overrides_take_effect() {
        let mut config = RegistryConfig::default();
        config.apply_overrides(None, Some("wellness".to_string()), vec!["eng".to_string()]);

        let ctx = Context::new(config).unwrap();
        assert_eq!(ctx.registry.domain().as_str(), "wellness");
        assert_eq!(ctx.registry.languages().len(), 1);
    }
}
