use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod settings;

use cli::{Cli, Commands};
use settings::Settings;
use tbdeploy_core::DeployEngine;
use tbdeploy_git::GitRepository;
use tbdeploy_teambox::TeamboxClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tbdeploy=info,tbdeploy_core=info,tbdeploy_git=info,tbdeploy_teambox=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let repository = GitRepository::open(&cli.repo);

    match cli.command.unwrap_or(Commands::Announce) {
        Commands::Scan => commands::scan(&repository, cli.tag.as_deref(), cli.dedupe).await,
        command => {
            let settings = Settings::load(&cli.config)?;
            let client = TeamboxClient::new(&settings.teambox())?;
            let options = settings.engine_options(cli.tag, cli.dedupe);
            let engine = DeployEngine::new(repository, client, options);

            if command == Commands::Preview {
                commands::preview(&engine).await
            } else {
                commands::announce(&engine).await
            }
        }
    }
}
