//! Book Registry
//!
//! A small web application for registering books, each identified by a
//! unique BN ID, and listing them newest first.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
    /// Signing key for the flash cookie
    pub flash_key: Key,
}

impl AppState {
    pub fn new(config: &AppConfig, services: services::Services) -> Self {
        Self {
            services: Arc::new(services),
            flash_key: signing_key(&config.session.secret_key),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.flash_key.clone()
    }
}

/// Stretch a secret of any length to the 64 bytes a cookie `Key` needs
fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}
