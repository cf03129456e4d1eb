//! Application factory
//!
//! Builds the actix-web `App` used both by the binary and by tests.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use tk_infra::HealthReport;
use tk_shared::{error_codes, ErrorResponse};

use crate::handlers::json_error_handler;
use crate::middleware::RequestIdMiddleware;
use crate::routes::auth::{self, AppState};

/// Default JSON body limit; token payloads are small
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 16 * 1024;

/// Create the application with its middleware and routes
pub fn create_app(
    app_state: web::Data<AppState>,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(max_payload_size)
                .error_handler(json_error_handler),
        )
        // Outermost last: the request span opens before the id is assigned
        .wrap(RequestIdMiddleware)
        .wrap(TracingLogger::default())
        .configure(configure_routes)
        .default_service(web::route().to(not_found))
}

/// Register the health check and the `/api/v1/auth` scope
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1/auth")
            .route("/tokens", web::post().to(auth::issue_tokens))
            .route("/refresh", web::post().to(auth::refresh))
            .route("/revoke", web::post().to(auth::revoke))
            .route("/introspect", web::post().to(auth::introspect)),
    );
}

async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    health_response(&state.infrastructure.health().await)
}

/// 200 when every connected backend answered, 503 otherwise
fn health_response(report: &HealthReport) -> HttpResponse {
    let components: serde_json::Map<String, serde_json::Value> = report
        .components
        .iter()
        .map(|c| {
            (
                c.name.to_string(),
                serde_json::json!({
                    "status": if c.healthy { "up" } else { "down" },
                    "detail": c.detail,
                }),
            )
        })
        .collect();

    let body = serde_json::json!({
        "status": report.status(),
        "service": "tokenkeep",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "components": components,
    });

    if report.is_healthy() {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
