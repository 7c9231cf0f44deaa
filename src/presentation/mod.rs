//! Presentation Layer - HTTP surface
//!
//! Route table, request handlers, and the handler-local models.

pub mod controllers;
pub mod models;
pub mod routes;

pub use controllers::AppState;
pub use routes::{ApiDoc, create_router};
