use secrecy::SecretString;

use crate::app_error::AppError;

pub mod waitlist;

/// Postgres-backed repositories.
///
/// Holds only the connection string: each operation opens its own
/// connection and closes it before returning.
pub struct PostgresPersistence {
    database_url: SecretString,
}

impl PostgresPersistence {
    pub fn new(database_url: SecretString) -> Self {
        PostgresPersistence { database_url }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}
