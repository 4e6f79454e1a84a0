use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "corpus-registry",
    version,
    about = "Resolve, provision and verify multilingual corpus databases"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Settings file; defaults to ./corpus-registry.toml when present.
    #[arg(long, global = true, env = "CORPUS_REGISTRY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project root holding the `corpora/` directory.
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    pub domain: Option<String>,

    /// Supported language code; repeat to list several.
    #[arg(long = "language", global = true)]
    pub languages: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved path layout.
    Paths(ReportArgs),
    /// Create any missing corpus directories.
    Provision(ReportArgs),
    /// Check every language database.
    Verify(VerifyArgs),
    /// Load and normalize every language database.
    Load(LoadArgs),
    /// Provision, then verify.
    Init(InitArgs),
    /// Render the project tree.
    Structure,
    /// Fingerprint every present database file.
    Inventory(InventoryArgs),
    /// Print the effective settings.
    Settings(ReportArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct VerifyArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Verify every configured domain, not only the active one.
    #[arg(long, default_value_t = false)]
    pub all_domains: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Write the loaded snapshot to this file.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InitArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Fail when any language database is not ready.
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InventoryArgs {
    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "corpus-registry",
            "verify",
            "--domain",
            "climate",
            "--language",
            "eng",
            "--language",
            "esp",
            "--all-domains",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.global.domain.as_deref(), Some("climate"));
        assert_eq!(cli.global.languages, vec!["eng", "esp"]);
        match cli.command {
            Commands::Verify(args) => assert!(args.all_domains),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
