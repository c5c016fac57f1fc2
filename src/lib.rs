//! VenueSync Analytics Server
//!
//! A Rust implementation of the VenueSync venue-analytics backend,
//! answering natural-language questions about restaurant revenue from a
//! per-day revenue ledger and exposing the same aggregates to chart
//! consumers over a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod nlq;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
