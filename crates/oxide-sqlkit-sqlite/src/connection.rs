//! `Connection` implementation over an sqlx SQLite pool.

use async_stream::try_stream;
use futures::future::BoxFuture;
use futures::stream::{BoxStream, TryStreamExt};
use oxide_sqlkit_core::{Connection, Query, Value};
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::debug;

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Executes statements on a [`SqlitePool`].
#[derive(Debug, Clone)]
pub struct SqliteConnection {
    pool: SqlitePool,
}

impl SqliteConnection {
    /// Wraps an existing pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `url`.
    ///
    /// In-memory databases get a single connection that is never recycled,
    /// since closing it would discard the database.
    ///
    /// # Errors
    ///
    /// Returns the sqlx error if the database cannot be opened.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let mut options = SqlitePoolOptions::new();
        if is_in_memory(url) {
            options = options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        debug!(url, "Connecting to SQLite");
        let pool = options.connect(url).await?;
        Ok(Self::new(pool))
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Binds one value onto an sqlx query.
#[must_use]
pub fn bind_value(query: SqliteQuery<'_>, value: Value) -> SqliteQuery<'_> {
    match value {
        Value::Null => query.bind(Option::<i64>::None),
        Value::Bool(b) => query.bind(b),
        Value::Int(i) => query.bind(i),
        Value::Float(f) => query.bind(f),
        Value::Text(s) => query.bind(s),
        Value::Blob(b) => query.bind(b),
    }
}

fn prepare(sql: &str, binds: Vec<Value>) -> SqliteQuery<'_> {
    binds
        .into_iter()
        .fold(sqlx::query(sql), bind_value)
}

impl Connection for SqliteConnection {
    type Row = SqliteRow;
    type Error = sqlx::Error;

    fn execute(&self, query: Query) -> BoxFuture<'_, Result<(), Self::Error>> {
        Box::pin(async move {
            let (sql, binds) = query.into_parts();
            let result = prepare(&sql, binds).execute(&self.pool).await?;
            debug!(rows_affected = result.rows_affected(), "Statement finished");
            Ok(())
        })
    }

    fn fetch(&self, query: Query) -> BoxStream<'_, Result<Self::Row, Self::Error>> {
        Box::pin(try_stream! {
            let (sql, binds) = query.into_parts();
            let mut rows = prepare(&sql, binds).fetch(&self.pool);
            while let Some(row) = rows.try_next().await? {
                yield row;
            }
        })
    }
}
