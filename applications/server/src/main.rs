/// Tunedeck Server - music discovery and playlist API
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tunedeck_catalog::{CatalogClient, StaticToken};
use tunedeck_core::UserId;
use tunedeck_notify::NotifierRegistry;
use tunedeck_server::{config::ServerConfig, create_router, services::AuthService, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tunedeck-server")]
#[command(about = "Tunedeck music discovery and playlist server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Mint an access token for local development
    IssueToken {
        /// User the token identifies
        #[arg(short, long)]
        user_id: String,
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunedeck_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::IssueToken { user_id, config } => {
            issue_token(&user_id, config)?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ServerConfig::load_from(config_path.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Tunedeck Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let store = tunedeck_storage::connect(&config.storage.database_url).await?;
    tracing::info!("Database connected");

    // Initialize catalog client
    let credentials = Arc::new(StaticToken::from_option(config.catalog.access_token.clone()));
    let catalog = CatalogClient::new(config.catalog.to_catalog_config(), credentials)?;
    tracing::info!("Catalog client ready ({})", catalog.base_url());

    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    ));

    let app_state = AppState::new(
        Arc::new(store),
        Arc::new(catalog),
        Arc::new(NotifierRegistry::new()),
        auth_service,
    );

    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn issue_token(user_id: &str, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ServerConfig::load_from(config_path.as_deref())?;
    config.validate()?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    );
    let token = auth_service.create_access_token(&UserId::new(user_id))?;

    println!("{}", token);
    Ok(())
}
