//! Connection pool bootstrap and the statement executor for built queries.

use crate::error::AppError;
use crate::sql::QueryBuf;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool};
use std::time::Duration;

/// Tables the REST surface serves; their presence is checked at startup.
const REQUIRED_TABLES: &[&str] = &["careers", "work_experience", "study_experience"];

const IDLE_TIMEOUT: Duration = Duration::from_secs(30);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);

/// Build the shared connection pool. Connections are created lazily; use
/// [`test_connection`] to verify reachability at startup.
pub fn connect(url: &str, max_connections: u32) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(IDLE_TIMEOUT)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy(url)
        .map_err(AppError::Db)?;
    Ok(pool)
}

/// Round-trip check against the database; logs the server time on success.
pub async fn test_connection(pool: &PgPool) -> Result<(), AppError> {
    let (now,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("SELECT NOW()").fetch_one(pool).await?;
    tracing::info!(server_time = %now, "database connected");
    Ok(())
}

/// Warn about any served table missing from the public schema. The tables are
/// created by applying `schema.sql`; this only reports, it never creates.
pub async fn ensure_tables_present(pool: &PgPool) -> Result<(), AppError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT tablename FROM pg_tables WHERE schemaname = 'public' AND tablename = ANY($1)",
    )
    .bind(
        REQUIRED_TABLES
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<String>>(),
    )
    .fetch_all(pool)
    .await?;
    let found: std::collections::HashSet<&str> = rows.iter().map(|(t,)| t.as_str()).collect();
    for table in REQUIRED_TABLES {
        if !found.contains(table) {
            tracing::warn!(table, "table missing; apply schema.sql to create it");
        }
    }
    if found.len() == REQUIRED_TABLES.len() {
        tracing::info!("all required tables present");
    }
    Ok(())
}

/// Run a built statement and decode every row.
pub async fn fetch_all<T>(pool: &PgPool, q: &QueryBuf) -> Result<Vec<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, "query");
    let mut query = sqlx::query_as::<_, T>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_all(pool).await?)
}

/// Run a built statement expected to return at most one row.
pub async fn fetch_optional<T>(pool: &PgPool, q: &QueryBuf) -> Result<Option<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %q.sql, "query");
    let mut query = sqlx::query_as::<_, T>(&q.sql);
    for p in &q.params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_optional(pool).await?)
}
