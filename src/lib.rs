//! Equipamentos Pesados - heavy equipment inventory
//!
//! A REST JSON API for tracking heavy machines: code, type, model,
//! operating status, hour meter, location and acquisition date.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
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
