//! Bibliotheca Catalog Kernel
//!
//! Serves the account menu over HTTP or prints it for a given user.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bibliotheca_kernel::site::RequestAuth;
use bibliotheca_kernel::{AppState, Config, routes};

/// Bibliotheca catalog kernel.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default).
    Serve,

    /// Print the account menu as a user would see it.
    Menu {
        /// Name of the active item, e.g. "holds".
        #[arg(long, default_value = "")]
        active: String,

        /// Prefix for element ids.
        #[arg(long, default_value = "")]
        id_prefix: String,

        /// Catalog username; omit for an anonymous visitor.
        #[arg(long)]
        user: Option<String>,

        /// ILS patron login of the user.
        #[arg(long)]
        patron: Option<String>,

        /// Print the filtered menu as JSON instead of HTML.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    let state = AppState::new(&config).context("failed to initialize application state")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, state).await,
        Command::Menu {
            active,
            id_prefix,
            user,
            patron,
            json,
        } => {
            let auth = RequestAuth::from_parts(user.as_deref(), patron.as_deref());
            let ctx = state.site().context(&auth);
            if json {
                let menu = state.account_menu().menu(&ctx);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&menu).context("failed to encode menu")?
                );
            } else {
                let html = state.account_menu().render(&ctx, &active, &id_prefix)?;
                println!("{html}");
            }
            Ok(())
        }
    }
}

async fn serve(config: &Config, state: AppState) -> Result<()> {
    info!("Starting Bibliotheca catalog kernel");

    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    // stderr keeps `menu` output clean on stdout
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
