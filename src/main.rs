use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use todo_api_rust::auth::{CredentialHasher, TokenAuthority};
use todo_api_rust::config::AppConfig;
use todo_api_rust::database::{MemoryUserStore, PgUserStore, UserStore};
use todo_api_rust::server;
use todo_api_rust::state::AppState;

#[derive(Parser)]
#[command(name = "todo-api-rust")]
#[command(about = "To-do API server with bearer token authentication")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Listen port, overrides TODO_API_PORT/PORT")]
        port: Option<u16>,
    },

    #[command(about = "Print an Argon2 digest for seeding the users table")]
    HashPassword {
        #[arg(help = "Plaintext password to hash")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => serve(port).await,
        Commands::HashPassword { password } => {
            let digest = CredentialHasher::new().hash(&password)?;
            println!("{}", digest);
            Ok(())
        }
    }
}

async fn serve(port_override: Option<u16>) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = port_override {
        config.server.port = port;
    }

    info!("Starting Todo API in {:?} mode", config.environment);
    if config.uses_development_secret() {
        warn!("SECRET_KEY not set; signing tokens with the development key");
    }

    let pg_store = match config.database.url {
        Some(_) => Some(
            PgUserStore::connect(&config.database)
                .await
                .context("failed to connect to database")?,
        ),
        None => None,
    };

    let users: Arc<dyn UserStore> = match &pg_store {
        Some(store) => Arc::new(store.clone()),
        None => {
            warn!("DATABASE_URL not set; using an empty in-memory user store");
            Arc::new(MemoryUserStore::new())
        }
    };

    let state = AppState::new(TokenAuthority::new(&config.security), users);
    let app = server::app(state, &config.security);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Todo API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(store) = pg_store {
        store.close().await;
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
