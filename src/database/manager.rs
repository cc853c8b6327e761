use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("can't connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("can't create customers table: {0}")]
    Schema(#[source] sqlx::Error),

    /// A statement failed; `context` names the step that failed
    #[error("{context}: {source}")]
    Query {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl DatabaseError {
    /// Adapter for `map_err` that tags a driver error with the failing step
    pub fn query(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| DatabaseError::Query { context, source }
    }

    /// True when the error came from a single-row fetch that matched nothing.
    /// Callers still report it as a storage failure.
    pub fn is_row_not_found(&self) -> bool {
        matches!(
            self,
            DatabaseError::Query {
                source: sqlx::Error::RowNotFound,
                ..
            }
        )
    }
}

const CREATE_CUSTOMERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS customers (
        id SERIAL PRIMARY KEY,
        name TEXT,
        email TEXT,
        status TEXT
    )
"#;

/// Builds the shared connection pool and bootstraps the schema
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open a pool against the configured database and verify one connection
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.url)
            .await
            .map_err(DatabaseError::Connect)?;

        info!(max_connections = config.max_connections, "Created database pool");
        Ok(pool)
    }

    /// Idempotently create the `customers` table
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_CUSTOMERS_TABLE)
            .execute(pool)
            .await
            .map_err(DatabaseError::Schema)?;

        info!("customers table is ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_error_message_carries_context() {
        let err = DatabaseError::query("can't scan get statement")(sqlx::Error::RowNotFound);
        let msg = err.to_string();
        assert!(msg.starts_with("can't scan get statement: "), "{}", msg);
        assert!(err.is_row_not_found());
    }

    #[test]
    fn other_failures_are_not_row_not_found() {
        let err = DatabaseError::query("can't execute update statement")(sqlx::Error::PoolTimedOut);
        assert!(!err.is_row_not_found());
        assert!(!DatabaseError::Connect(sqlx::Error::PoolClosed).is_row_not_found());
    }

    #[test]
    fn schema_statement_is_idempotent() {
        assert!(CREATE_CUSTOMERS_TABLE.contains("CREATE TABLE IF NOT EXISTS customers"));
        assert!(CREATE_CUSTOMERS_TABLE.contains("id SERIAL PRIMARY KEY"));
    }
}
