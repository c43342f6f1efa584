use std::net::SocketAddr;

use env_helpers::get_env_default;
use secrecy::SecretString;

use crate::app_error::AppError;

/// Whether 500 responses may carry the raw parser/driver message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisclosure {
    Expose,
    Redact,
}

impl ErrorDisclosure {
    pub fn from_flag(expose: bool) -> Self {
        if expose {
            ErrorDisclosure::Expose
        } else {
            ErrorDisclosure::Redact
        }
    }

    /// Replaces raw failure detail with a generic message under `Redact`.
    /// Fixed-text errors (400, 405, missing config) pass through unchanged.
    pub fn apply(self, err: AppError) -> AppError {
        match self {
            ErrorDisclosure::Redact if err.carries_raw_detail() => {
                tracing::error!(error = %err, "Redacting failure detail from response");
                AppError::Internal("Internal error".into())
            }
            _ => err,
        }
    }
}

pub struct AppConfig {
    /// `None` when `DATABASE_URL` is unset or empty.
    pub database_url: Option<SecretString>,
    pub bind_addr: SocketAddr,
    /// SECURITY: `Expose` sends database and parser errors to clients
    /// verbatim. Set `EXPOSE_ERROR_DETAILS=false` on public deployments.
    pub error_disclosure: ErrorDisclosure,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url: Option<SecretString> = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| SecretString::new(url.into()));

        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let expose_error_details: bool = get_env_default("EXPOSE_ERROR_DETAILS", true);

        Self {
            database_url,
            bind_addr,
            error_disclosure: ErrorDisclosure::from_flag(expose_error_details),
        }
    }
}
