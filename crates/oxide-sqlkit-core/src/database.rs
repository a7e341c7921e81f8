//! The execution façade.

use std::fmt;
use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use tracing::debug;

use crate::connection::Connection;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::statement::{AlterTable, CreateIndex, CreateTable, DropTable, Insert, Select};

/// A dialect paired with a connection.
///
/// Cheap to clone; both halves are shared. Every statement builder starts
/// here.
///
/// ```rust
/// use oxide_sqlkit_core::dialect::PostgresDialect;
/// use oxide_sqlkit_core::types::DataType;
/// use oxide_sqlkit_core::{Database, DryRun};
///
/// let db = Database::new(PostgresDialect::new(), DryRun::new());
/// let query = db
///     .create_table("galaxies")
///     .column("id", DataType::Bigint, [])
///     .to_query()
///     .unwrap();
/// assert_eq!(query.sql, "CREATE TABLE \"galaxies\" (\"id\" BIGINT)");
/// ```
pub struct Database<C> {
    dialect: Arc<dyn Dialect>,
    connection: Arc<C>,
}

impl<C> Clone for Database<C> {
    fn clone(&self) -> Self {
        Self {
            dialect: Arc::clone(&self.dialect),
            connection: Arc::clone(&self.connection),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for Database<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("dialect", &self.dialect.name())
            .field("connection", &self.connection)
            .finish()
    }
}

impl<C: Connection> Database<C> {
    /// Creates a database handle.
    pub fn new<D: Dialect + 'static>(dialect: D, connection: C) -> Self {
        Self::with_dialect(Arc::new(dialect), connection)
    }

    /// Creates a database handle from a shared dialect.
    pub fn with_dialect(dialect: Arc<dyn Dialect>, connection: C) -> Self {
        Self {
            dialect,
            connection: Arc::new(connection),
        }
    }

    /// Returns the dialect.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Returns the connection.
    #[must_use]
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Starts a `DROP TABLE`.
    pub fn drop_table(&self, table: impl Into<String>) -> DropTable<'_, C> {
        DropTable::new(self, table.into())
    }

    /// Starts a `CREATE TABLE`.
    pub fn create_table(&self, table: impl Into<String>) -> CreateTable<'_, C> {
        CreateTable::new(self, table.into())
    }

    /// Starts an `ALTER TABLE`.
    pub fn alter_table(&self, table: impl Into<String>) -> AlterTable<'_, C> {
        AlterTable::new(self, table.into())
    }

    /// Starts a `CREATE INDEX`.
    pub fn create_index(&self, name: impl Into<String>) -> CreateIndex<'_, C> {
        CreateIndex::new(self, name.into())
    }

    /// Starts an `INSERT INTO`.
    pub fn insert_into(&self, table: impl Into<String>) -> Insert<'_, C> {
        Insert::new(self, table.into())
    }

    /// Starts a `SELECT`.
    pub fn select(&self) -> Select<'_, C> {
        Select::new(self)
    }

    /// Executes a rendered statement.
    pub async fn execute(&self, query: Query) -> Result<(), C::Error> {
        self.send(query).await.map_err(Error::Execution)
    }

    /// Executes a rendered statement and streams its rows.
    pub fn fetch(&self, query: Query) -> BoxStream<'_, Result<C::Row, C::Error>> {
        debug!(
            dialect = self.dialect.name(),
            sql = %query.sql,
            binds = ?query.binds,
            "Fetching SQL"
        );
        self.connection
            .fetch(query)
            .map_err(Error::Execution)
            .boxed()
    }

    /// Executes without wrapping the connection error.
    pub(crate) async fn send(&self, query: Query) -> std::result::Result<(), C::Error> {
        debug!(
            dialect = self.dialect.name(),
            sql = %query.sql,
            binds = ?query.binds,
            "Executing SQL"
        );
        self.connection.execute(query).await
    }
}
