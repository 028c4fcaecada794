//! API Module
//!
//! HTTP handlers and routing for the clipboard REST API.
//!
//! # Endpoints
//! - `POST /save` - Store a value under a freshly generated key
//! - `GET /get/:key` - Retrieve a value by key
//! - `OPTIONS *` - CORS preflight

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{cors_layer, create_router};
