//! HTTP server for the excuse service.

mod auth;
mod config;
mod error;
mod handlers;
mod http;
mod metrics;
mod middleware;
mod request;
mod response;

pub use auth::Credentials;
pub use config::{CliArgs, ServerConfig, load_storage_config};
pub use handlers::AppState;
pub use http::{CodexcuseServer, build_router};
pub use metrics::Metrics;
