use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use crate::{adapters::persistence::PostgresPersistence, infra::config::AppConfig};

pub mod app;
pub mod config;
pub mod db;
pub mod setup;

/// `None` when no database is configured; requests that need one then
/// fail individually instead of the process refusing to start.
pub fn postgres_persistence(config: &AppConfig) -> Option<PostgresPersistence> {
    match &config.database_url {
        Some(url) => Some(PostgresPersistence::new(SecretString::new(
            url.expose_secret().into(),
        ))),
        None => {
            warn!("DATABASE_URL is not set; waitlist requests will fail until it is configured");
            None
        }
    }
}
