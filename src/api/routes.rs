//! API Routes
//!
//! Configures the Axum router with all clipboard endpoints.

use axum::{
    http::{header, header::InvalidHeaderValue, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::handlers::{get_handler, save_handler, AppState};

/// `Access-Control-Allow-Methods` sent with every response
pub const ALLOWED_METHODS: &str = "GET,POST,OPTIONS";

/// `Access-Control-Allow-Headers` sent with every response
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Builds the cross-origin policy.
///
/// `*` allows any origin; anything else must be a single origin such as
/// `https://clip.example.com`. `OPTIONS` requests are answered directly
/// with 200 and an empty body.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = if allowed_origin.trim() == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::exact(HeaderValue::from_str(allowed_origin.trim())?)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /save` - Store a value under a new key
/// - `GET /get/:key` - Retrieve a value by key
///
/// # Middleware
/// - CORS: the given policy, which also answers preflight requests
/// - Allowed methods and headers on non-preflight responses too
/// - Tracing: Logs all requests
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/save", post(save_handler))
        .route("/get/:key", get(get_handler))
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
