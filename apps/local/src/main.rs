use anyhow::Context;
use clap::Parser;
use flashcards_local::cli::{self, Cli};
use flashcards_local::{logging, AppConfig, AppState, SqliteRepository};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(path) = cli.db.clone() {
        config.db_path = path;
    }

    logging::init(&config.log_filter).context("failed to install log subscriber")?;

    config
        .ensure_data_dir()
        .with_context(|| format!("failed to create data directory for {}", config.db_path.display()))?;
    let repository = SqliteRepository::open(&config.db_path)
        .with_context(|| format!("failed to open database at {}", config.db_path.display()))?;
    let state = AppState::new(repository);

    cli::run(cli.command, &state)
}
