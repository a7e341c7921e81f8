//! CREATE INDEX.

use crate::connection::Connection;
use crate::database::Database;
use crate::error::{BuildError, BuildResult, Result};
use crate::query::{Query, SqlWriter};

use super::{BuildState, Latch};

const STATEMENT: &str = "CREATE INDEX";

/// Builder for `CREATE [UNIQUE] INDEX [IF NOT EXISTS] "name" ON "t" (...)`.
#[derive(Debug)]
pub struct CreateIndex<'a, C> {
    db: &'a Database<C>,
    latch: Latch,
    name: String,
    table: Option<String>,
    columns: Vec<String>,
    unique: bool,
    if_not_exists: bool,
}

impl<'a, C: Connection> CreateIndex<'a, C> {
    pub(crate) fn new(db: &'a Database<C>, name: String) -> Self {
        Self {
            db,
            latch: Latch::new(STATEMENT),
            name,
            table: None,
            columns: Vec::new(),
            unique: false,
            if_not_exists: false,
        }
    }

    /// Sets the indexed table.
    #[must_use]
    pub fn on(mut self, table: impl Into<String>) -> Self {
        if self.latch.touch() {
            self.table = Some(table.into());
        }
        self
    }

    /// Appends an indexed column.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>) -> Self {
        if self.latch.touch() {
            self.columns.push(name.into());
        }
        self
    }

    /// Appends several indexed columns.
    #[must_use]
    pub fn columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.latch.touch() {
            self.columns.extend(names.into_iter().map(Into::into));
        }
        self
    }

    /// Makes the index UNIQUE.
    #[must_use]
    pub fn unique(mut self) -> Self {
        if self.latch.touch() {
            self.unique = true;
        }
        self
    }

    /// Adds `IF NOT EXISTS`.
    #[must_use]
    pub fn if_not_exists(mut self) -> Self {
        if self.latch.touch() {
            let dialect = self.db.dialect();
            if dialect.supports_index_if_not_exists() {
                self.if_not_exists = true;
            } else {
                self.latch.fail(BuildError::UnsupportedFeature {
                    dialect: dialect.name(),
                    feature: "CREATE INDEX IF NOT EXISTS",
                });
            }
        }
        self
    }

    /// Returns the builder state.
    #[must_use]
    pub const fn state(&self) -> BuildState {
        self.latch.state()
    }

    /// Renders without consuming the builder. Fails once the builder was
    /// rendered.
    pub fn to_query(&self) -> BuildResult<Query> {
        self.latch.preview()?;
        self.build()
    }

    /// Renders the statement. A builder renders once.
    pub fn render(&mut self) -> BuildResult<Query> {
        self.latch.begin_render()?;
        self.build()
    }

    /// Renders and executes the statement.
    pub async fn run(mut self) -> Result<(), C::Error> {
        let query = self.render()?;
        self.db.execute(query).await
    }

    fn build(&self) -> BuildResult<Query> {
        let Some(ref table) = self.table else {
            return Err(BuildError::MissingClause {
                statement: STATEMENT,
                clause: "ON",
            });
        };
        if self.columns.is_empty() {
            return Err(BuildError::MissingClause {
                statement: STATEMENT,
                clause: "column list",
            });
        }

        let mut w = SqlWriter::new(self.db.dialect());
        w.push("CREATE ");
        if self.unique {
            w.push("UNIQUE ");
        }
        w.push("INDEX ");
        if self.if_not_exists {
            w.push("IF NOT EXISTS ");
        }
        w.push_identifier(&self.name)?.push(" ON ");
        w.push_identifier(table)?.push(" (");
        w.push_identifier_list(&self.columns)?.push(")");
        Ok(w.finish())
    }
}
