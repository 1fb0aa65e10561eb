//! # Folio Server
//!
//! HTTP surface of the Folio portfolio: the public bilingual page, the
//! language switch, admin sign-in, the gated admin CRUD API with up/down
//! reordering, asset uploads and a live stream of admin notices.
//!
//! Content services live in `folio-core`; this crate wires them to axum.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::handlers::health::{health_handler, ping_handler};
use crate::infra::config::CorsConfig;

/// Builds the full application router.
pub fn create_app(state: AppState) -> Router {
    let cors_layer = if state.config().dev_mode {
        CorsLayer::permissive()
    } else {
        cors_from_config(&state.config().cors)
    };

    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .merge(routes::create_api_router(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        )
        .with_state(state)
}

fn cors_from_config(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();
    // Credentials cannot be combined with a wildcard origin.
    let credentials = cors.allow_credentials && !origins.is_empty();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| {
            Method::from_bytes(m.as_bytes())
                .inspect_err(|_| warn!(method = %m, "ignoring invalid CORS method"))
                .ok()
        })
        .collect();

    let headers: Vec<HeaderName> = cors
        .allowed_headers
        .iter()
        .filter_map(|h| {
            HeaderName::from_bytes(h.as_bytes())
                .inspect_err(|_| warn!(header = %h, "ignoring invalid CORS header"))
                .ok()
        })
        .collect();

    let mut layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list(methods))
        .allow_headers(AllowHeaders::list(headers));

    if credentials {
        layer = layer.allow_credentials(true);
    }

    layer
}
