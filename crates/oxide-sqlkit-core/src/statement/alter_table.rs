//! ALTER TABLE.
//!
//! Column changes accumulate in order. Whether they can share one statement
//! is a dialect capability:
//!
//! - [`AlterTable::render`] produces a single statement and fails with
//!   [`BuildError::BatchAlterUnsupported`] when a non-batching dialect is
//!   given more than one change.
//! - [`AlterTable::render_split`] produces one statement per change.
//!
//! Split execution is not atomic. If statement *k* fails, statements before
//! it stay applied and [`Error::PartiallyApplied`] says how many.

use core::slice;

use tracing::warn;

use crate::connection::Connection;
use crate::database::Database;
use crate::dialect::resolve_type;
use crate::error::{BuildError, BuildResult, Error, Result};
use crate::query::{Query, SqlWriter};
use crate::types::DataType;

use super::{BuildState, ColumnConstraint, ColumnDefinition, Latch};

const STATEMENT: &str = "ALTER TABLE";

/// One accumulated column change.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterOperation {
    /// `ADD COLUMN`
    AddColumn(ColumnDefinition),
    /// `DROP COLUMN`
    DropColumn(String),
    /// Change a column's type.
    ModifyColumn {
        /// Column name.
        name: String,
        /// New type.
        data_type: DataType,
    },
}

impl AlterOperation {
    /// Returns the operation kind as used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddColumn(_) => "ADD COLUMN",
            Self::DropColumn(_) => "DROP COLUMN",
            Self::ModifyColumn { .. } => "MODIFY COLUMN",
        }
    }

    fn render(&self, w: &mut SqlWriter<'_>) -> BuildResult<()> {
        match self {
            Self::AddColumn(column) => {
                w.push("ADD COLUMN ");
                column.render(w)
            }
            Self::DropColumn(name) => {
                w.push("DROP COLUMN ").push_identifier(name)?;
                Ok(())
            }
            Self::ModifyColumn { name, data_type } => {
                let dialect = w.dialect();
                let Some(syntax) = dialect.alter_table_syntax().modify_column else {
                    return Err(BuildError::UnsupportedAlter {
                        dialect: dialect.name(),
                        operation: self.kind(),
                    });
                };
                let type_name = resolve_type(dialect, data_type)?;
                w.push(syntax.clause).push(" ").push_identifier(name)?;
                if let Some(keyword) = syntax.type_keyword {
                    w.push(" ").push(keyword);
                }
                w.push(" ").push(&type_name);
                Ok(())
            }
        }
    }
}

/// Builder for `ALTER TABLE`.
#[derive(Debug)]
pub struct AlterTable<'a, C> {
    db: &'a Database<C>,
    latch: Latch,
    table: String,
    operations: Vec<AlterOperation>,
}

impl<'a, C: Connection> AlterTable<'a, C> {
    pub(crate) fn new(db: &'a Database<C>, table: String) -> Self {
        Self {
            db,
            latch: Latch::new(STATEMENT),
            table,
            operations: Vec::new(),
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn column<I>(self, name: impl Into<String>, data_type: DataType, constraints: I) -> Self
    where
        I: IntoIterator<Item = ColumnConstraint>,
    {
        self.column_definition(ColumnDefinition::new(name, data_type).constraints(constraints))
    }

    /// Adds a prepared column definition.
    #[must_use]
    pub fn column_definition(self, column: ColumnDefinition) -> Self {
        self.operation(AlterOperation::AddColumn(column))
    }

    /// Drops a column.
    #[must_use]
    pub fn drop_column(self, name: impl Into<String>) -> Self {
        self.operation(AlterOperation::DropColumn(name.into()))
    }

    /// Changes a column's type.
    #[must_use]
    pub fn modify_column(self, name: impl Into<String>, data_type: DataType) -> Self {
        self.operation(AlterOperation::ModifyColumn {
            name: name.into(),
            data_type,
        })
    }

    /// Appends an operation after checking the dialect can perform it.
    #[must_use]
    pub fn operation(mut self, op: AlterOperation) -> Self {
        if !self.latch.touch() {
            return self;
        }

        let dialect = self.db.dialect();
        let syntax = dialect.alter_table_syntax();
        let supported = match op {
            AlterOperation::AddColumn(_) => syntax.add_column,
            AlterOperation::DropColumn(_) => syntax.drop_column,
            AlterOperation::ModifyColumn { .. } => syntax.modify_column.is_some(),
        };
        if !supported {
            self.latch.fail(BuildError::UnsupportedAlter {
                dialect: dialect.name(),
                operation: op.kind(),
            });
            return self;
        }

        let checked = match op {
            AlterOperation::AddColumn(ref column) => column.validate(dialect),
            AlterOperation::ModifyColumn { ref data_type, .. } => {
                resolve_type(dialect, data_type).map(drop)
            }
            AlterOperation::DropColumn(_) => Ok(()),
        };
        if self.latch.check(checked).is_some() {
            self.operations.push(op);
        }
        self
    }

    /// Returns the accumulated operations.
    #[must_use]
    pub fn operations(&self) -> &[AlterOperation] {
        &self.operations
    }

    /// Returns the builder state.
    #[must_use]
    pub const fn state(&self) -> BuildState {
        self.latch.state()
    }

    /// Renders the single-statement form without consuming the builder.
    pub fn to_query(&self) -> BuildResult<Query> {
        self.latch.preview()?;
        self.build_batched()
    }

    /// Renders the one-per-operation form without consuming the builder.
    pub fn to_queries(&self) -> BuildResult<Vec<Query>> {
        self.latch.preview()?;
        self.build_split()
    }

    /// Renders every operation into one statement.
    pub fn render(&mut self) -> BuildResult<Query> {
        self.latch.begin_render()?;
        self.build_batched()
    }

    /// Renders one statement per operation, in accumulation order.
    pub fn render_split(&mut self) -> BuildResult<Vec<Query>> {
        self.latch.begin_render()?;
        self.build_split()
    }

    /// Executes the single-statement form.
    pub async fn run(mut self) -> Result<(), C::Error> {
        let query = self.render()?;
        self.db.execute(query).await
    }

    /// Executes one statement per operation, awaiting each before the next.
    ///
    /// There is no rollback: when statement *k* (1-based, k > 1) fails, the
    /// error is [`Error::PartiallyApplied`] with `applied = k - 1`. A failure
    /// of the first statement is a plain [`Error::Execution`].
    pub async fn run_split(mut self) -> Result<(), C::Error> {
        let queries = self.render_split()?;
        let total = queries.len();
        for (applied, query) in queries.into_iter().enumerate() {
            if let Err(source) = self.db.send(query).await {
                if applied == 0 {
                    return Err(Error::Execution(source));
                }
                warn!(
                    table = %self.table,
                    applied,
                    total,
                    error = %source,
                    "ALTER TABLE failed part-way, earlier statements remain applied"
                );
                return Err(Error::PartiallyApplied {
                    applied,
                    total,
                    source,
                });
            }
        }
        Ok(())
    }

    fn ensure_operations(&self) -> BuildResult<()> {
        if self.operations.is_empty() {
            return Err(BuildError::NoColumns {
                statement: STATEMENT,
            });
        }
        Ok(())
    }

    fn build_batched(&self) -> BuildResult<Query> {
        self.ensure_operations()?;
        let dialect = self.db.dialect();
        if self.operations.len() > 1 && !dialect.supports_batch_alter() {
            return Err(BuildError::BatchAlterUnsupported {
                dialect: dialect.name(),
                operations: self.operations.len(),
            });
        }
        self.build_statement(&self.operations)
    }

    fn build_split(&self) -> BuildResult<Vec<Query>> {
        self.ensure_operations()?;
        self.operations
            .iter()
            .map(|op| self.build_statement(slice::from_ref(op)))
            .collect()
    }

    fn build_statement(&self, operations: &[AlterOperation]) -> BuildResult<Query> {
        let mut w = SqlWriter::new(self.db.dialect());
        w.push("ALTER TABLE ").push_identifier(&self.table)?.push(" ");
        for (i, op) in operations.iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            op.render(&mut w)?;
        }
        Ok(w.finish())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use futures::future::{self, BoxFuture, FutureExt};
    use futures::stream::{self, BoxStream, StreamExt};

    use super::*;
    use crate::connection::DryRun;
    use crate::dialect::{MySqlDialect, PostgresDialect, SqliteDialect};
    use crate::expr::Literal;

    #[derive(Debug, thiserror::Error)]
    #[error("statement {0} rejected")]
    struct Rejected(usize);

    /// Accepts statements until the `fail_at`-th (1-based).
    #[derive(Debug)]
    struct FailAt {
        fail_at: usize,
        seen: Mutex<Vec<String>>,
    }

    impl FailAt {
        fn new(fail_at: usize) -> Self {
            Self {
                fail_at,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Connection for FailAt {
        type Row = ();
        type Error = Rejected;

        fn execute(&self, query: Query) -> BoxFuture<'_, std::result::Result<(), Rejected>> {
            let mut seen = self.seen.lock().unwrap();
            seen.push(query.sql);
            let n = seen.len();
            let result = if n == self.fail_at {
                Err(Rejected(n))
            } else {
                Ok(())
            };
            future::ready(result).boxed()
        }

        fn fetch(&self, _query: Query) -> BoxStream<'_, std::result::Result<(), Rejected>> {
            stream::empty().boxed()
        }
    }

    #[test]
    fn test_batched_alter() {
        let db = Database::new(PostgresDialect::new(), DryRun::new());
        let q = db
            .alter_table("planets")
            .drop_column("extra_extra")
            .modify_column("extra", DataType::Text)
            .column("hi", DataType::Text, [])
            .to_query()
            .unwrap();
        assert_eq!(
            q.sql,
            "ALTER TABLE \"planets\" DROP COLUMN \"extra_extra\", \
             ALTER COLUMN \"extra\" SET DATA TYPE TEXT, ADD COLUMN \"hi\" TEXT"
        );

        let db = Database::new(MySqlDialect::new(), DryRun::new());
        let q = db
            .alter_table("planets")
            .drop_column("extra_extra")
            .modify_column("extra", DataType::Text)
            .column("hi", DataType::Text, [])
            .to_query()
            .unwrap();
        assert_eq!(
            q.sql,
            "ALTER TABLE `planets` DROP COLUMN `extra_extra`, \
             MODIFY COLUMN `extra` TEXT, ADD COLUMN `hi` TEXT"
        );
    }

    #[test]
    fn test_single_add_with_default() {
        let db = Database::new(SqliteDialect::new(), DryRun::new());
        let q = db
            .alter_table("planets")
            .column(
                "name",
                DataType::Text,
                [ColumnConstraint::Default(Literal::string("Unamed Planet"))],
            )
            .to_query()
            .unwrap();
        assert_eq!(
            q.sql,
            "ALTER TABLE \"planets\" ADD COLUMN \"name\" TEXT DEFAULT 'Unamed Planet'"
        );
    }

    #[test]
    fn test_non_batching_dialect_refuses_single_statement() {
        let db = Database::new(SqliteDialect::new(), DryRun::new());
        let mut builder = db
            .alter_table("planets")
            .column("very_extra", DataType::Bigint, [])
            .column("extra_extra", DataType::Text, []);
        assert_eq!(
            builder.render(),
            Err(BuildError::BatchAlterUnsupported {
                dialect: "sqlite",
                operations: 2,
            })
        );
    }

    #[test]
    fn test_split_keeps_order() {
        let db = Database::new(SqliteDialect::new(), DryRun::new());
        let mut builder = db
            .alter_table("planets")
            .column("very_extra", DataType::Bigint, [])
            .column("extra_extra", DataType::Text, [])
            .drop_column("extra");
        let sql: Vec<String> = builder
            .render_split()
            .unwrap()
            .into_iter()
            .map(|q| q.sql)
            .collect();
        assert_eq!(
            sql,
            [
                "ALTER TABLE \"planets\" ADD COLUMN \"very_extra\" INTEGER",
                "ALTER TABLE \"planets\" ADD COLUMN \"extra_extra\" TEXT",
                "ALTER TABLE \"planets\" DROP COLUMN \"extra\"",
            ]
        );
    }

    #[test]
    fn test_split_on_batching_dialect() {
        let db = Database::new(PostgresDialect::new(), DryRun::new());
        let builder = db
            .alter_table("planets")
            .column("a", DataType::Int, [])
            .column("b", DataType::Int, []);
        assert_eq!(builder.to_queries().unwrap().len(), 2);
        assert_eq!(
            builder.to_query().unwrap().sql,
            "ALTER TABLE \"planets\" ADD COLUMN \"a\" INTEGER, ADD COLUMN \"b\" INTEGER"
        );
    }

    #[test]
    fn test_modify_unsupported_on_sqlite() {
        let db = Database::new(SqliteDialect::new(), DryRun::new());
        let builder = db
            .alter_table("planets")
            .modify_column("extra", DataType::Text)
            .column("hi", DataType::Text, []);
        assert_eq!(
            builder.to_queries(),
            Err(BuildError::UnsupportedAlter {
                dialect: "sqlite",
                operation: "MODIFY COLUMN",
            })
        );
    }

    #[test]
    fn test_no_operations() {
        let db = Database::new(PostgresDialect::new(), DryRun::new());
        assert_eq!(
            db.alter_table("planets").to_query(),
            Err(BuildError::NoColumns {
                statement: "ALTER TABLE"
            })
        );
    }

    #[tokio::test]
    async fn test_run_split_executes_in_order() {
        let db = Database::new(SqliteDialect::new(), DryRun::new());
        db.alter_table("planets")
            .column("very_extra", DataType::Bigint, [])
            .column("extra_extra", DataType::Text, [])
            .run_split()
            .await
            .unwrap();
        let queries = db.connection().queries();
        assert_eq!(queries.len(), 2);
        assert!(queries[0].sql.contains("very_extra"));
        assert!(queries[1].sql.contains("extra_extra"));
    }

    #[tokio::test]
    async fn test_run_split_partial_failure() {
        let db = Database::new(SqliteDialect::new(), FailAt::new(2));
        let err = db
            .alter_table("planets")
            .column("a", DataType::Int, [])
            .column("b", DataType::Int, [])
            .column("c", DataType::Int, [])
            .run_split()
            .await
            .unwrap_err();
        match err {
            Error::PartiallyApplied {
                applied,
                total,
                source,
            } => {
                assert_eq!(applied, 1);
                assert_eq!(total, 3);
                assert_eq!(source.0, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Nothing after the failing statement is sent.
        assert_eq!(db.connection().seen().len(), 2);
    }

    #[tokio::test]
    async fn test_run_split_first_statement_fails() {
        let db = Database::new(SqliteDialect::new(), FailAt::new(1));
        let err = db
            .alter_table("planets")
            .column("a", DataType::Int, [])
            .column("b", DataType::Int, [])
            .run_split()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Execution(Rejected(1))));
        assert_eq!(db.connection().seen().len(), 1);
    }

    #[tokio::test]
    async fn test_run_reports_batch_error_before_sending() {
        let db = Database::new(SqliteDialect::new(), DryRun::new());
        let err = db
            .alter_table("planets")
            .column("a", DataType::Int, [])
            .column("b", DataType::Int, [])
            .run()
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_build(),
            Some(BuildError::BatchAlterUnsupported { operations: 2, .. })
        ));
        assert!(db.connection().queries().is_empty());
    }

    #[test]
    fn test_previews_after_render_rejected() {
        let db = Database::new(SqliteDialect::new(), DryRun::new());
        let mut builder = db
            .alter_table("planets")
            .column("a", DataType::Int, [])
            .column("b", DataType::Int, []);
        assert_eq!(builder.render_split().unwrap().len(), 2);
        let spent = BuildError::AlreadyRendered {
            statement: "ALTER TABLE",
        };
        assert_eq!(builder.to_queries().unwrap_err(), spent);
        assert_eq!(builder.to_query().unwrap_err(), spent);
    }
}
