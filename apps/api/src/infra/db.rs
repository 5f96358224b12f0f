use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;
use crate::logging::pii::Redacted;

/// Open a pooled connection to `url` (postgres in production, sqlite in tests).
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(url.to_owned());
    opts.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let conn = Database::connect(opts)
        .await
        .map_err(|e| AppError::db_unavailable(format!("failed to connect: {e}")))?;

    info!(url = %Redacted(&sanitize_db_url(url)), "database connected");
    Ok(conn)
}

/// Strip the password component from a database URL for logging.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((userinfo, host)) => {
            let user = userinfo.split(':').next().unwrap_or_default();
            format!("{scheme}://{user}:***@{host}")
        }
        None => url.to_string(),
    }
}
