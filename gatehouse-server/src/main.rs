//! # Gatehouse Server
//!
//! Account service: signup, login, stateless session cookies, profile
//! management.
//!
//! ## Overview
//!
//! Gatehouse provides:
//!
//! - **Registration**: Uniqueness-checked signup with Argon2id password hashing
//! - **Authentication**: Credential verification issuing one-hour HS256
//!   session tokens as HTTP-only cookies
//! - **Session Validation**: Pure signature + expiry checks, no server-side
//!   session state
//! - **Profiles**: Viewing and editing of the authenticated user's record
//!
//! ## Architecture
//!
//! The server is built on Axum and uses PostgreSQL for the credential store.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gatehouse_core::auth::PasswordCrypto;
use gatehouse_server::{AppState, db, infra::config::Config, routes};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "gatehouse-server")]
#[command(about = "Account service with signup, login, and stateless session cookies")]
struct Cli {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(port) = cli.port {
        config.server_port = port;
    }
    if let Some(host) = cli.host {
        config.server_host = host;
    }
    let config = Arc::new(config);

    if config.dev_mode {
        info!("dev mode: session cookies issued without the Secure attribute");
    }

    // Fatal on failure: without the store there is nothing to serve.
    let store = db::ensure_connected(&config).await?;

    let crypto = Arc::new(
        PasswordCrypto::new(config.auth_password_pepper.as_bytes())
            .context("failed to initialize password hashing")?,
    );

    let state = AppState {
        store,
        crypto,
        config: config.clone(),
    };

    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config));

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("invalid server address")?;

    info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind server address")?;

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn build_cors(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any())
}
