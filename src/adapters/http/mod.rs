//! HTTP boundary: OData routes and security middleware.

pub mod odata;
pub mod security;
pub mod server;

pub use security::SecurityState;
pub use server::{build_router, AppState, HttpServer};
