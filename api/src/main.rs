use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use tk_api::app::create_app;
use tk_api::routes::auth::AppState;
use tk_api::telemetry::init_tracing;
use tk_core::{TokenService, TokenServiceConfig};
use tk_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!(environment = %config.environment, "Starting Tokenkeep API server");

    if config.environment.requires_signing_secret() && config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; tokens are signed with the default development secret");
    }

    let infra = tk_infra::initialize(&config)
        .await
        .context("failed to initialize infrastructure")?;

    let token_config = TokenServiceConfig::from_jwt_config(&config.auth.jwt)
        .context("invalid JWT configuration")?;

    let token_service = TokenService::builder(token_config)
        .with_store(infra.refresh_tokens.clone())
        .with_resolver(infra.identities.clone())
        .with_descriptor_cache(
            infra.descriptor_cache.clone(),
            Duration::from_secs(config.cache.default_ttl),
        )
        .with_cache_namespace(config.cache.namespace())
        .build()
        .context("failed to build token service")?;

    let infra = Arc::new(infra);
    let app_state = web::Data::new(AppState::new(token_service, infra.clone()));
    let max_payload_size = config.server.max_payload_size;
    let bind_address = config.server.bind_address();

    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), max_payload_size))
        .keep_alive(config.server.keep_alive_duration());
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    infra.shutdown().await;
    info!("Server stopped");
    Ok(())
}
