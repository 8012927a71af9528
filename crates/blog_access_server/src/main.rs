//! blog_access_server: standalone REST server. Configuration: see `config.rs`.

use anyhow::Context;
use blog_access_core::bootstrap::{bootstrap_admin, BootstrapOutcome};
use blog_access_server::config::ServerConfig;
use blog_access_server::middleware::jwt::JwtConfig;
use blog_access_server::router::build_router;
use blog_access_server::state::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,blog_access_server=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let jwt_config = JwtConfig::from_secret(config.jwt_secret.as_bytes());
    let state = AppState::in_memory(jwt_config, &config.public_url)
        .with_token_ttl_hours(config.token_ttl_hours);

    // Default admin, before the listener accepts anything.
    match &config.admin {
        Some(seed) => {
            match bootstrap_admin(state.users.as_ref(), &seed.email, &seed.password).await? {
                BootstrapOutcome::Created { email, .. } => {
                    tracing::info!("bootstrapped default admin {email}")
                }
                BootstrapOutcome::AlreadyPresent => tracing::info!("admin already present"),
            }
        }
        None => tracing::warn!("BLOG_ADMIN_EMAIL/BLOG_ADMIN_PASSWORD unset, no admin bootstrapped"),
    }

    let app = build_router(state)?;

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("blog_access_server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
