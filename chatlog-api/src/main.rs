use actix_web::{middleware::Logger, web, App, HttpServer};
use chatlog_api::config::ApiConfig;
use chatlog_api::storage::Datastore;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "chatlog-api", version, about = "Read-only API over chatbot conversation logs")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override server.host
    #[arg(long)]
    host: Option<String>,

    /// Override server.port
    #[arg(long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration first to get logging settings
    let mut config = ApiConfig::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let datastore = Datastore::from_config(&config.database)?;
    if !datastore.is_configured() {
        warn!("No Postgres config found (PGHOST or DATABASE_URL); data endpoints will return errors");
    }

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting chatlog-api server at http://{}", bind_addr);

    let app_datastore = web::Data::new(datastore.clone());
    let cors_config = config.cors.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(app_datastore.clone())
            .wrap(chatlog_api::cors_middleware(&cors_config))
            .wrap(Logger::default())
            .configure(chatlog_api::configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    datastore.close().await;
    info!("chatlog-api stopped");
    Ok(())
}
