mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::DashboardContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("PANEL_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "panel", &mut std::io::stdout());
        }
        Commands::Card(card_cmd) => {
            let mut ctx = DashboardContext::connect(cli.server_url).await?;
            handlers::card::handle(&mut ctx, card_cmd.action).await?;
        }
        Commands::Group(group_cmd) => {
            let mut ctx = DashboardContext::connect(cli.server_url).await?;
            handlers::group::handle(&mut ctx, group_cmd.action).await?;
        }
        Commands::Settings(settings_cmd) => {
            let mut ctx = DashboardContext::connect(cli.server_url).await?;
            handlers::settings::handle(&mut ctx, settings_cmd.action).await?;
        }
    }

    Ok(())
}
