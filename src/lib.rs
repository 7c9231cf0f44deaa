//! CSO Adapter - Clair Security Operator translation proxy
//!
//! Translates CSO-style vulnerability requests into container registry
//! API calls and converts the registry's native scan reports into the
//! secscan interest-group format.
//!
//! # Modules
//!
//! - [`config`] — Strongly-typed configuration with TOML and environment variable support
//! - [`domain`] — Registry report and secscan response models
//! - [`application`] — Report aggregation and error types
//! - [`infrastructure`] — Registry adapters and HTTP clients
//! - [`presentation`] — HTTP handlers, routing, and API documentation
//! - [`logging`] — Structured logging with tracing
//! - [`metrics`] — Prometheus metric names and descriptions

mod app;

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod metrics;
pub mod presentation;

pub use app::{AppError, create_app};
pub use config::Config;
pub use logging::init_tracing;
