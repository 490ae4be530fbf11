use std::path::PathBuf;

use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use moodtunes::{config, server};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Port to listen on (overrides PORT)
    #[clap(long)]
    port: Option<u16>,

    /// Load environment variables from this file instead of ./.env
    #[clap(long)]
    env_file: Option<PathBuf>,
}

async fn run(cli: Cli) -> moodtunes::Res<()> {
    let mut config = config::Config::from_env()?;
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }

    let state = server::AppState::from_config(&config)?;
    server::start_api_server(state, &config.bind_addr()).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env_result = config::load_env(cli.env_file.as_deref());

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodtunes=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = env_result {
        error!("Cannot load environment. Err: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        error!("Server stopped with an error: {}", e);
        std::process::exit(1);
    }
}
