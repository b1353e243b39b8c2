//! # Prepared Queries
//!
//! The output of every finder: a statement template using `:name`
//! placeholders and an ordered map of the values bound to them.
//!
//! Templates are dialect neutral apart from the MySQL style
//! `LIMIT :starting, :limit` (also understood by SQLite). Execution goes
//! through [`PreparedQuery::to_statement`], which rewrites the named
//! placeholders to the positional markers Sea-ORM expects.

use std::ops::Range;

use sea_orm::{DatabaseBackend, Statement, Value};

use crate::errors::ApiError;

/// A literal bound to a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for BindValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<BindValue> for Value {
    fn from(value: BindValue) -> Self {
        match value {
            BindValue::Int(v) => v.into(),
            BindValue::Float(v) => v.into(),
            BindValue::Text(v) => v.into(),
        }
    }
}

/// Placeholder name to value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindMap(Vec<(String, BindValue)>);

impl BindMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to `name`. Rebinding a name replaces the value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<BindValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Move every binding of `other` into `self`.
    pub fn extend(&mut self, other: Self) {
        for (name, value) in other.0 {
            self.insert(name, value);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BindValue> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BindValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A finished, parameterized statement ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    sql: String,
    binds: BindMap,
}

impl PreparedQuery {
    pub(crate) fn new(sql: String, binds: BindMap) -> Self {
        Self { sql, binds }
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn binds(&self) -> &BindMap {
        &self.binds
    }

    /// Placeholder names in the order they appear in the template.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        scan_placeholders(&self.sql)
            .into_iter()
            .map(|(_, name)| name)
            .collect()
    }

    /// Build a Sea-ORM statement with positional parameters for `backend`.
    ///
    /// # Errors
    ///
    /// Returns an internal `ApiError` if the template references a
    /// placeholder with no bound value, or for Postgres, which rejects
    /// backtick quoting and `LIMIT offset, count`.
    pub fn to_statement(&self, backend: DatabaseBackend) -> Result<Statement, ApiError> {
        if backend == DatabaseBackend::Postgres {
            return Err(ApiError::internal(
                "Failed to prepare query",
                Some("Postgres is not a supported backend".to_string()),
            ));
        }
        let mut sql = String::with_capacity(self.sql.len());
        let mut values: Vec<Value> = Vec::with_capacity(self.binds.len());
        let mut copied_up_to = 0;

        for (span, name) in scan_placeholders(&self.sql) {
            let value = self.binds.get(name).ok_or_else(|| {
                ApiError::internal(
                    "Failed to prepare query",
                    Some(format!("no value bound for placeholder :{name}")),
                )
            })?;
            sql.push_str(&self.sql[copied_up_to..span.start]);
            values.push(value.clone().into());
            sql.push('?');
            copied_up_to = span.end;
        }
        sql.push_str(&self.sql[copied_up_to..]);

        Ok(Statement::from_sql_and_values(backend, sql, values))
    }
}

/// Locate `:name` placeholders outside single-quoted literals.
fn scan_placeholders(sql: &str) -> Vec<(Range<usize>, &str)> {
    let bytes = sql.as_bytes();
    let mut found = Vec::new();
    let mut in_literal = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' => in_literal = !in_literal,
            b':' if !in_literal
                && bytes
                    .get(i + 1)
                    .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_') =>
            {
                let start = i;
                let mut end = i + 1;
                while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
                {
                    end += 1;
                }
                found.push((start..end, &sql[start + 1..end]));
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    found
}
