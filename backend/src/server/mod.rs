//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{LoadTarget, ServerConfig};
pub use state_builders::{
    SharedPorts, build_http_state, diesel_http_state, in_memory_http_state,
};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use crate::Trace;
use crate::domain::LoadGenerator;
use crate::inbound::http::auth::login;
use crate::inbound::http::error::{json_error_handler, not_found, query_error_handler};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::load_generator::{call_count, status, toggle_timer};
use crate::inbound::http::orders::{add_order, my_orders};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::stats;
use crate::inbound::http::users::{create_account, lookup_accounts};
use crate::outbound::stat_http::HttpStatSubmitter;

/// Shared data handed to every worker's `App`.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
}

/// Assemble the application: middleware, extractor configuration and every
/// route.
pub fn build_app(
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

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .configure(stats::configure)
        .service(create_account)
        .service(lookup_accounts)
        .service(login)
        .service(my_orders)
        .service(add_order)
        .service(toggle_timer)
        .service(call_count)
        .service(status)
        .service(ready)
        .service(live)
        .default_service(web::to(not_found))
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// Must be called from within a Tokio runtime; the load generator spawns its
/// ticks there.
///
/// # Errors
/// Propagates [`std::io::Error`] when the submission client cannot be built
/// or the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        tokens,
        load,
        db_pool,
    } = config;

    let submitter = HttpStatSubmitter::new(load.base_url.clone(), load.submit_timeout)
        .map_err(|err| std::io::Error::other(format!("load submitter: {err}")))?;
    let clock = Arc::new(DefaultClock);
    let generator = LoadGenerator::new(Arc::new(submitter), clock.clone(), load.period);
    let http_state = web::Data::new(build_http_state(
        db_pool.as_ref(),
        SharedPorts {
            tokens,
            clock,
            load: Arc::new(generator),
        },
    ));

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(
        %bind_addr,
        load_target = %load.base_url,
        persistent = db_pool.is_some(),
        "server listening"
    );
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::Value;

    use super::*;
    use crate::domain::TRACE_ID_HEADER;
    use crate::inbound::http::test_utils::HttpStateBuilder;

    fn deps() -> AppDependencies {
        let health = HealthState::new();
        health.mark_ready();
        AppDependencies {
            health_state: web::Data::new(health),
            http_state: web::Data::new(HttpStateBuilder::default().build()),
        }
    }

    #[actix_web::test]
    async fn unknown_routes_use_the_error_envelope() {
        let app = actix_test::init_service(build_app(deps())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/nowhere").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "not_found");
    }

    #[actix_web::test]
    async fn malformed_json_is_an_invalid_request() {
        let app = actix_test::init_service(build_app(deps())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/energy/postenergyStats")
                .insert_header(("content-type", "application/json"))
                .set_payload("{\"date\":")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[actix_web::test]
    async fn probes_and_status_are_wired() {
        let app = actix_test::init_service(build_app(deps())).await;

        for uri in ["/health/ready", "/health/live", "/", "/get-call-count"] {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::get().uri(uri).to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }
}
