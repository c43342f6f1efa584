use secrecy::{ExposeSecret, SecretString};
use sqlx::{Connection, PgConnection};
use tracing::{debug, warn};

use crate::app_error::AppResult;

pub async fn open_connection(database_url: &SecretString) -> AppResult<PgConnection> {
    let conn = PgConnection::connect(database_url.expose_secret()).await?;
    debug!("Opened database connection");
    Ok(conn)
}

/// Closes `conn`, logging instead of failing: the request outcome is
/// already decided by the time this runs.
pub async fn close_connection(conn: PgConnection) {
    match conn.close().await {
        Ok(()) => debug!("Closed database connection"),
        Err(err) => warn!(error = %err, "Failed to close database connection"),
    }
}
