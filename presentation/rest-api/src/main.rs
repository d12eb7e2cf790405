use dotenvy::dotenv;

mod api {
    pub mod error;
    pub mod tags;
    pub mod ui;
    pub mod health {
        pub mod routes;
    }
    pub mod paper {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
    pub mod pipeline {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
    pub mod summary {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
}

mod config {
    pub mod app_config;
    pub mod cors_config;
    pub mod env;
    pub mod nougat_config;
    pub mod openai_config;
    pub mod server_config;
    pub mod workspace_config;
}

mod setup {
    pub mod dependency_injection;
    pub mod server;
}

use config::app_config::AppConfig;
use setup::{dependency_injection::DependencyContainer, server::Server};

/// Arxiv Researcher entry point
///
/// Loads configuration, wires the adapters into the use cases and serves the
/// API together with the browser UI.
/// - config/: environment-driven configuration
/// - setup/: dependency injection and server setup
/// - api/: route handlers, DTOs and error mappers
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Wire dependencies
    let container = DependencyContainer::new(&config)?;

    // 5. Run server
    Server::run(config, container).await?;

    Ok(())
}
