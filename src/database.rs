use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, JsonValue};

use crate::errors::ApiError;
use crate::query::PreparedQuery;

/// Runs a [`PreparedQuery`] and returns its rows as JSON objects keyed by
/// output column name.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn fetch_all(&self, query: &PreparedQuery) -> Result<Vec<JsonValue>, ApiError>;
}

#[async_trait]
impl QueryExecutor for DatabaseConnection {
    async fn fetch_all(&self, query: &PreparedQuery) -> Result<Vec<JsonValue>, ApiError> {
        let statement = query.to_statement(self.get_database_backend())?;
        tracing::debug!(sql = %statement.sql, binds = query.binds().len(), "executing query");
        let rows = JsonValue::find_by_statement(statement).all(self).await?;
        Ok(rows)
    }
}
