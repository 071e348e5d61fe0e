use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookadmin::cli::commands::{self, MarkKind};
use bookadmin::cli::{Cli, Commands, RankingAction};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookadmin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let base_url = cli.base_url;

    match cli.command {
        Commands::Init => commands::init().await,
        Commands::Login { username, password } => {
            commands::login(base_url, username, password).await
        }
        Commands::Logout => commands::logout(base_url).await,
        Commands::Whoami { remote } => commands::whoami(base_url, remote).await,
        Commands::Routes { format } => commands::routes(base_url, format).await,
        Commands::Open { path } => commands::open(base_url, &path).await,
        Commands::Favorite { action } => commands::mark(base_url, MarkKind::Favorite, action).await,
        Commands::Like { action } => commands::mark(base_url, MarkKind::Like, action).await,
        Commands::Ranking { action } => match action {
            RankingAction::Show {
                kind,
                period,
                limit,
                format,
            } => commands::ranking_show(base_url, kind, period, limit, format).await,
            RankingAction::Rebuild { kind, period } => {
                commands::ranking_rebuild(base_url, kind, period).await
            }
        },
    }
}
