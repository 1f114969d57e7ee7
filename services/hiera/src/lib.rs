//! Hiera inventory service
//!
//! REST API over the node and role registries, with optional on-disk
//! mirroring of nodes and a static file server for the web UI.

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::unwrap_in_result)
)]

pub mod config;
pub mod handlers;
pub mod server;

pub use config::{ConfigError, ServiceConfig};
pub use handlers::AppState;
pub use server::{build_state, create_router, run};
