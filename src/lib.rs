//! Role-gated portal in front of an external IoT analytics dashboard.
//!
//! Users pick one of three plant roles, sign in with the shared password
//! and land on a dashboard page that links out to the hosted Grafana board.
//! Sessions live in process memory only.

pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod templates;
pub mod utils;

pub use routes::build_app;
