//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use shelter_backend::Trace;
#[cfg(debug_assertions)]
use shelter_backend::doc::ApiDoc;
use shelter_backend::inbound::http::configure_api;
use shelter_backend::inbound::http::error::configure_extractors;
use shelter_backend::inbound::http::health::{HealthState, live, ready};
use shelter_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .configure(configure_extractors)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The health state is marked ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};
    use shelter_backend::domain::TRACE_ID_HEADER;
    use shelter_backend::inbound::http::health::StoreKind;
    use shelter_backend::inbound::http::token_config::TokenSettings;
    use std::time::Duration;
    use zeroize::Zeroizing;

    fn memory_config() -> ServerConfig {
        ServerConfig::new(
            TokenSettings {
                key: Zeroizing::new(vec![3; 64]),
                ttl: Duration::from_secs(600),
            },
            "127.0.0.1:0".parse().expect("literal address"),
        )
    }

    fn deps(config: &ServerConfig) -> AppDependencies {
        let health = HealthState::new(config.store_kind());
        health.mark_ready();
        AppDependencies {
            health_state: web::Data::new(health),
            http_state: web::Data::new(build_http_state(config)),
        }
    }

    #[::core::prelude::v1::test]
    fn config_without_pool_reports_memory_store() {
        assert_eq!(memory_config().store_kind(), StoreKind::Memory);
    }

    #[actix_web::test]
    async fn probes_report_store_and_trace_header() {
        let app = test::init_service(build_app(deps(&memory_config()))).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["store"], "memory");
    }

    #[actix_web::test]
    async fn malformed_json_uses_error_envelope() {
        let app = test::init_service(build_app(deps(&memory_config()))).await;
        let request = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"], json!({"field": "body", "code": "malformed"}));
    }
}
