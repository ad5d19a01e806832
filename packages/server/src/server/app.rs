//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use twilio::{TwilioOptions, TwilioService};

use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::kernel::{ServerDeps, SystemClock, TwilioSmsAdapter};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    calendar_handler, cancel_event_handler, create_event_handler, decision_history_handler,
    delete_event_handler, event_registrations_handler, get_event_handler, health_handler,
    list_events_handler, my_registrations_handler, record_decision_handler,
    request_code_handler, submit_event_handler, update_event_handler, verify_code_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Production dependencies: Twilio for SMS, the wall clock for expiry
pub fn build_server_deps(pool: PgPool, config: &Config) -> ServerDeps {
    let twilio = Arc::new(TwilioService::new(TwilioOptions {
        account_sid: config.twilio_account_sid.clone(),
        auth_token: config.twilio_auth_token.clone(),
        from_number: config.twilio_from_number.clone(),
    }));
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
    ));

    ServerDeps::new(
        pool,
        Arc::new(TwilioSmsAdapter::new(twilio, config.sms_country_code.clone())),
        Arc::new(SystemClock),
        jwt_service,
    )
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps) -> Router {
    let jwt_service = deps.jwt_service.clone();
    let app_state = AppState {
        deps: Arc::new(deps),
    };

    // CORS configuration - allow any origin; browsers authenticate with bearer tokens
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        // Event store + approval engine
        .route(
            "/api/events",
            post(create_event_handler).get(list_events_handler),
        )
        .route("/api/events/calendar", get(calendar_handler))
        .route(
            "/api/events/:id",
            get(get_event_handler)
                .put(update_event_handler)
                .delete(delete_event_handler),
        )
        .route("/api/events/:id/submit", post(submit_event_handler))
        .route("/api/events/:id/cancel", post(cancel_event_handler))
        .route(
            "/api/events/:id/decisions",
            post(record_decision_handler).get(decision_history_handler),
        )
        .route(
            "/api/events/:id/registrations",
            get(event_registrations_handler),
        )
        // Verification gate + registration ledger
        .route(
            "/api/registrations/request-code",
            post(request_code_handler),
        )
        .route("/api/registrations/verify-code", post(verify_code_handler))
        .route("/api/registrations/mine", get(my_registrations_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
