//! HTTP API server for pwapack.
//!
//! This crate provides the HTTP boundary around the transform pipeline:
//! - Multipart intake of the site archive and icon
//! - Streaming the repackaged archive back to the client
//! - Error-to-status mapping
//! - A health endpoint

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
