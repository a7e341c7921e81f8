//! CREATE TABLE.

use crate::connection::Connection;
use crate::database::Database;
use crate::error::{BuildError, BuildResult, Result};
use crate::query::{Query, SqlWriter};
use crate::types::DataType;

use super::{BuildState, ColumnConstraint, ColumnDefinition, Latch};

const STATEMENT: &str = "CREATE TABLE";

/// Builder for `CREATE TABLE [IF NOT EXISTS] "t" (...)`.
#[derive(Debug)]
pub struct CreateTable<'a, C> {
    db: &'a Database<C>,
    latch: Latch,
    table: String,
    if_not_exists: bool,
    columns: Vec<ColumnDefinition>,
}

impl<'a, C: Connection> CreateTable<'a, C> {
    pub(crate) fn new(db: &'a Database<C>, table: String) -> Self {
        Self {
            db,
            latch: Latch::new(STATEMENT),
            table,
            if_not_exists: false,
            columns: Vec::new(),
        }
    }

    /// Adds `IF NOT EXISTS`.
    #[must_use]
    pub fn if_not_exists(mut self) -> Self {
        if self.latch.touch() {
            let dialect = self.db.dialect();
            if dialect.supports_if_not_exists() {
                self.if_not_exists = true;
            } else {
                self.latch.fail(BuildError::UnsupportedFeature {
                    dialect: dialect.name(),
                    feature: "CREATE TABLE IF NOT EXISTS",
                });
            }
        }
        self
    }

    /// Adds a column. The type is checked against the dialect right away.
    #[must_use]
    pub fn column<I>(self, name: impl Into<String>, data_type: DataType, constraints: I) -> Self
    where
        I: IntoIterator<Item = ColumnConstraint>,
    {
        self.column_definition(ColumnDefinition::new(name, data_type).constraints(constraints))
    }

    /// Adds a prepared column definition.
    #[must_use]
    pub fn column_definition(mut self, column: ColumnDefinition) -> Self {
        if self.latch.touch()
            && self
                .latch
                .check(column.validate(self.db.dialect()))
                .is_some()
        {
            self.columns.push(column);
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
        if self.columns.is_empty() {
            return Err(BuildError::NoColumns {
                statement: STATEMENT,
            });
        }

        let mut w = SqlWriter::new(self.db.dialect());
        w.push("CREATE TABLE ");
        if self.if_not_exists {
            w.push("IF NOT EXISTS ");
        }
        w.push_identifier(&self.table)?.push(" (");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            column.render(&mut w)?;
        }
        w.push(")");
        Ok(w.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DryRun;
    use crate::dialect::{MySqlDialect, PostgresDialect, SqliteDialect};

    #[test]
    fn test_create_galaxies() {
        let db = Database::new(PostgresDialect::new(), DryRun::new());
        let q = db
            .create_table("galaxies")
            .column("id", DataType::Bigint, [ColumnConstraint::PrimaryKey])
            .column("name", DataType::Text, [])
            .to_query()
            .unwrap();
        assert_eq!(
            q.sql,
            "CREATE TABLE \"galaxies\" (\"id\" BIGINT PRIMARY KEY, \"name\" TEXT)"
        );
        assert!(q.binds.is_empty());
    }

    #[test]
    fn test_create_planets_if_not_exists() {
        let db = Database::new(SqliteDialect::new(), DryRun::new());
        let q = db
            .create_table("planets")
            .if_not_exists()
            .column("id", DataType::Bigint, [ColumnConstraint::PrimaryKey])
            .column(
                "galaxyID",
                DataType::Bigint,
                [ColumnConstraint::references("galaxies", "id")],
            )
            .to_query()
            .unwrap();
        assert_eq!(
            q.sql,
            "CREATE TABLE IF NOT EXISTS \"planets\" (\"id\" INTEGER PRIMARY KEY, \
             \"galaxyID\" INTEGER REFERENCES \"galaxies\" (\"id\"))"
        );
    }

    #[test]
    fn test_unsupported_type_fails_at_build() {
        let db = Database::new(SqliteDialect::new(), DryRun::new());
        let mut builder = db
            .create_table("docs")
            .column("body", DataType::Json, [])
            .column("id", DataType::Int, []);
        assert_eq!(
            builder.render(),
            Err(BuildError::UnsupportedType {
                dialect: "sqlite",
                data_type: String::from("JSON"),
            })
        );
    }

    #[test]
    fn test_invalid_custom_token() {
        let db = Database::new(MySqlDialect::new(), DryRun::new());
        let builder = db
            .create_table("t")
            .column("c", DataType::custom("INT); DROP TABLE t; --"), []);
        assert!(matches!(
            builder.to_query(),
            Err(BuildError::InvalidTypeToken(_))
        ));
    }

    #[test]
    fn test_no_columns() {
        let db = Database::new(PostgresDialect::new(), DryRun::new());
        assert_eq!(
            db.create_table("empty").to_query(),
            Err(BuildError::NoColumns {
                statement: "CREATE TABLE"
            })
        );
    }

    #[test]
    fn test_render_once() {
        let db = Database::new(PostgresDialect::new(), DryRun::new());
        let mut builder = db.create_table("t").column("a", DataType::Int, []);
        let preview = builder.to_query().unwrap();
        assert_eq!(builder.to_query().unwrap(), preview);
        assert_eq!(builder.render().unwrap(), preview);
        assert_eq!(builder.state(), BuildState::Rendered);
        assert_eq!(
            builder.render(),
            Err(BuildError::AlreadyRendered {
                statement: "CREATE TABLE"
            })
        );
    }

    #[tokio::test]
    async fn test_run_sends_statement() {
        let db = Database::new(MySqlDialect::new(), DryRun::new());
        db.create_table("galaxies")
            .column("id", DataType::Bigint, [ColumnConstraint::PrimaryKey])
            .run()
            .await
            .unwrap();
        let queries = db.connection().queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0].sql,
            "CREATE TABLE `galaxies` (`id` BIGINT PRIMARY KEY)"
        );
    }

    #[test]
    fn test_to_query_after_render_rejected() {
        let db = Database::new(MySqlDialect::new(), DryRun::new());
        let mut builder = db.create_table("galaxies").column("id", DataType::Bigint, []);
        builder.render().unwrap();
        assert_eq!(
            builder.to_query(),
            Err(BuildError::AlreadyRendered {
                statement: "CREATE TABLE"
            })
        );
    }
}
