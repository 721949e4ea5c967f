//! Supportdesk API Module
//!
//! HTTP surface for the support chat proxy: the chat routes, a health
//! check, CORS and request tracing.

pub mod handlers;
pub mod models;
pub mod server;

pub use handlers::*;
pub use models::*;
pub use server::*;
