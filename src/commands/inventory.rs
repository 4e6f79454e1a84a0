use anyhow::Result;
use tracing::{info, warn};

use crate::cli::InventoryArgs;
use crate::commands::Context;
use crate::model::{DatabaseEntry, DatabaseInventoryManifest, PathSet};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

pub const INVENTORY_MANIFEST_FILE: &str = "database_inventory.json";

pub fn run(ctx: &Context, args: &InventoryArgs) -> Result<()> {
    let paths = ctx.registry.resolve();
    let manifest = build_manifest(&paths);

    for language in &manifest.missing_languages {
        warn!(language = %language, "database file missing, not inventoried");
    }

    if args.dry_run {
        info!(
            database_count = manifest.database_count,
            domain = %manifest.domain,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| paths.base.join("manifests").join(INVENTORY_MANIFEST_FILE));

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote database inventory manifest");
    info!(database_count = manifest.database_count, "inventory completed");

    Ok(())
}

/// A database that cannot be hashed is listed as unreadable; the rest are still inventoried.
pub fn build_manifest(paths: &PathSet) -> DatabaseInventoryManifest {
    let mut databases = Vec::with_capacity(paths.languages.len());
    let mut missing_languages = Vec::new();
    let mut unreadable_languages = Vec::new();

    for language in &paths.languages {
        if !language.database.exists() {
            missing_languages.push(language.language.to_string());
            continue;
        }

        let (sha256, bytes) = match sha256_file(&language.database) {
            Ok(fingerprint) => fingerprint,
            Err(err) => {
                warn!(
                    language = %language.language,
                    path = %language.database.display(),
                    error = %err,
                    "database file unreadable, not inventoried"
                );
                unreadable_languages.push(language.language.to_string());
                continue;
            }
        };

        databases.push(DatabaseEntry {
            language: language.language.to_string(),
            path: language.database.display().to_string(),
            bytes,
            sha256,
        });
    }

    DatabaseInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        domain: paths.domain.to_string(),
        corpus_directory: paths.base.display().to_string(),
        database_count: databases.len(),
        missing_languages,
        unreadable_languages,
        databases,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::registry::CorpusRegistry;

    #[test]
    fn manifest_lists_present_databases_and_missing_languages() {
        let root = tempfile::tempdir().unwrap();
        let paths = CorpusRegistry::new(root.path(), "gai", &["eng", "esp"])
            .unwrap()
            .resolve();
        let eng_db = &paths.languages[0].database;
        fs::create_dir_all(eng_db.parent().unwrap()).unwrap();
        fs::write(eng_db, b"abc").unwrap();

        let manifest = build_manifest(&paths);

        assert_eq!(manifest.database_count, 1);
        assert_eq!(manifest.databases[0].language, "eng");
        assert_eq!(manifest.databases[0].bytes, 3);
        assert_eq!(
            manifest.databases[0].sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(manifest.missing_languages, vec!["esp"]);
    }

    #[test]
    fn unreadable_database_is_listed_without_aborting() {
        let root = tempfile::tempdir().unwrap();
        let paths = CorpusRegistry::new(root.path(), "gai", &["eng", "esp", "zho"])
            .unwrap()
            .resolve();
        // A directory where the database file belongs exists but cannot be read.
        fs::create_dir_all(&paths.languages[0].database).unwrap();
        let esp_db = &paths.languages[1].database;
        fs::create_dir_all(esp_db.parent().unwrap()).unwrap();
        fs::write(esp_db, b"{}").unwrap();

        let manifest = build_manifest(&paths);

        assert_eq!(manifest.unreadable_languages, vec!["eng"]);
        assert_eq!(manifest.missing_languages, vec!["zho"]);
        assert_eq!(manifest.database_count, 1);
        assert_eq!(manifest.databases[0].language, "esp");
    }
}
