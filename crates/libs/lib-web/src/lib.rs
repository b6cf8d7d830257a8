//! # Web Library
//!
//! HTTP handlers, middleware, the credential service, and server startup.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

pub use server::{create_router, init_tracing, start_server, AppState};
