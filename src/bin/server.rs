use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use bookshelf::auth::{CredentialVault, TokenManager};
use bookshelf::books::BookService;
use bookshelf::config::ServerConfig;
use bookshelf::handlers;
use bookshelf::storage::{create_memory_revocation_store, JsonStore};

#[tokio::main]
async fn main() {
    // Initialize env
    match dotenvy::dotenv() {
        Ok(_) => info!("Environment variables loaded from .env file"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };

    // Initialize logging
    env_logger::init();

    // Load config from the environment
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Configuration: host={}, port={}, data_dir={}",
        config.host,
        config.port,
        config.data_dir.display()
    );

    // Build shared state
    let vault = match CredentialVault::new(JsonStore::new(config.users_path())) {
        Ok(vault) => Arc::new(vault),
        Err(e) => {
            error!("Failed to initialize credential vault: {}", e);
            std::process::exit(1);
        }
    };
    let books = Arc::new(BookService::new(JsonStore::new(config.books_path())));
    let tokens = Arc::new(TokenManager::new(&config.token_secret, config.token_ttl));
    let revoked = create_memory_revocation_store();

    let api = handlers::app(vault, books, tokens, revoked);

    // Build the server address
    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Failed to parse server address: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting bookshelf server on {}", addr);

    // CORS only applies when an origin is configured
    if let Some(origin) = config.cors_origin.as_deref() {
        let cors = warp::cors()
            .allow_origin(origin)
            .allow_headers(vec!["authorization", "content-type"])
            .allow_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allow_credentials(true);

        warp::serve(api.with(cors)).run(addr).await;
    } else {
        warp::serve(api).run(addr).await;
    }
}
