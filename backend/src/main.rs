//! Backend entry-point: loads configuration, prepares storage and serves the
//! REST API with OpenAPI docs in debug builds.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use shelter_backend::inbound::http::health::HealthState;
use shelter_backend::inbound::http::token_config::{BuildMode, token_settings_from_env};
use shelter_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use shelter_backend::settings::ServerSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let tokens = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(tokens, bind_addr);
    match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
                .await
                .map_err(|err| std::io::Error::other(err.into_message()))?;
            config = config.with_db_pool(pool);
        }
        None => warn!("SHELTER_DATABASE_URL not set; records are kept in memory only"),
    }

    let health_state = web::Data::new(HealthState::new(config.store_kind()));
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
