//! HTTP API for fmngr.
//!
//! A thin layer over the storage registry and the file service: handlers
//! parse requests, call one core operation and serialize its result.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
