//! DROP TABLE.

use crate::connection::Connection;
use crate::database::Database;
use crate::error::{BuildError, BuildResult, Result};
use crate::query::{Query, SqlWriter};

use super::{BuildState, Latch};

const STATEMENT: &str = "DROP TABLE";

/// Builder for `DROP TABLE [IF EXISTS] "t" [CASCADE]`.
#[derive(Debug)]
pub struct DropTable<'a, C> {
    db: &'a Database<C>,
    latch: Latch,
    table: String,
    if_exists: bool,
    cascade: bool,
}

impl<'a, C: Connection> DropTable<'a, C> {
    pub(crate) fn new(db: &'a Database<C>, table: String) -> Self {
        Self {
            db,
            latch: Latch::new(STATEMENT),
            table,
            if_exists: false,
            cascade: false,
        }
    }

    /// Adds `IF EXISTS`.
    #[must_use]
    pub fn if_exists(mut self) -> Self {
        if self.latch.touch() {
            let dialect = self.db.dialect();
            if dialect.supports_if_exists() {
                self.if_exists = true;
            } else {
                self.latch.fail(BuildError::UnsupportedFeature {
                    dialect: dialect.name(),
                    feature: "DROP TABLE IF EXISTS",
                });
            }
        }
        self
    }

    /// Adds `CASCADE`.
    #[must_use]
    pub fn cascade(mut self) -> Self {
        if self.latch.touch() {
            let dialect = self.db.dialect();
            if dialect.supports_drop_cascade() {
                self.cascade = true;
            } else {
                self.latch.fail(BuildError::UnsupportedFeature {
                    dialect: dialect.name(),
                    feature: "DROP TABLE ... CASCADE",
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
        let mut w = SqlWriter::new(self.db.dialect());
        w.push("DROP TABLE ");
        if self.if_exists {
            w.push("IF EXISTS ");
        }
        w.push_identifier(&self.table)?;
        if self.cascade {
            w.push(" CASCADE");
        }
        Ok(w.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DryRun;
    use crate::dialect::{MySqlDialect, PostgresDialect, SqliteDialect};

    #[test]
    fn test_drop_if_exists() {
        let db = Database::new(PostgresDialect::new(), DryRun::new());
        let q = db.drop_table("planets").if_exists().to_query().unwrap();
        assert_eq!(q.sql, "DROP TABLE IF EXISTS \"planets\"");

        let db = Database::new(MySqlDialect::new(), DryRun::new());
        let q = db.drop_table("planets").to_query().unwrap();
        assert_eq!(q.sql, "DROP TABLE `planets`");
    }

    #[test]
    fn test_cascade() {
        let db = Database::new(PostgresDialect::new(), DryRun::new());
        let q = db
            .drop_table("galaxies")
            .if_exists()
            .cascade()
            .to_query()
            .unwrap();
        assert_eq!(q.sql, "DROP TABLE IF EXISTS \"galaxies\" CASCADE");

        let db = Database::new(SqliteDialect::new(), DryRun::new());
        assert_eq!(
            db.drop_table("galaxies").cascade().to_query(),
            Err(BuildError::UnsupportedFeature {
                dialect: "sqlite",
                feature: "DROP TABLE ... CASCADE",
            })
        );
    }

    #[test]
    fn test_empty_table_name() {
        let db = Database::new(SqliteDialect::new(), DryRun::new());
        assert_eq!(db.drop_table("").to_query(), Err(BuildError::EmptyIdentifier));
    }

    #[test]
    fn test_clause_after_render_is_reported() {
        let db = Database::new(PostgresDialect::new(), DryRun::new());
        let mut builder = db.drop_table("planets");
        builder.render().unwrap();
        let builder = builder.if_exists();
        assert_eq!(
            builder.to_query(),
            Err(BuildError::AlreadyRendered {
                statement: "DROP TABLE"
            })
        );
    }

    #[test]
    fn test_to_query_after_render_rejected() {
        let db = Database::new(SqliteDialect::new(), DryRun::new());
        let mut builder = db.drop_table("planets").if_exists();
        builder.render().unwrap();
        assert_eq!(
            builder.to_query(),
            Err(BuildError::AlreadyRendered {
                statement: "DROP TABLE"
            })
        );
    }
}
