//! quickclip - An ephemeral clipboard service
//!
//! Saves a text value under a short random key and serves it back until it
//! expires. Storage and expiration are delegated to Redis.

pub mod api;
pub mod config;
pub mod error;
pub mod keygen;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use store::{Backend, KvStore, MemoryStore, RedisStore};
