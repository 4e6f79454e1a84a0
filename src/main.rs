use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use corpus_registry::cli::{Cli, Commands};
use corpus_registry::commands::{self, Context};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context::from_args(&cli.global)?;

    match cli.command {
        Commands::Paths(args) => commands::paths::run(&ctx, &args),
        Commands::Provision(args) => commands::provision::run(&ctx, &args),
        Commands::Verify(args) => commands::verify::run(&ctx, &args),
        Commands::Load(args) => commands::load::run(&ctx, &args),
        Commands::Init(args) => commands::init::run(&ctx, &args),
        Commands::Structure => commands::structure::run(&ctx),
        Commands::Inventory(args) => commands::inventory::run(&ctx, &args),
        Commands::Settings(args) => commands::settings::run(&ctx, &args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
