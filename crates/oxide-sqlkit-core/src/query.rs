//! Rendered statements and the writer that produces them.

use core::fmt;

use crate::dialect::Dialect;
use crate::error::{BuildError, BuildResult};
use crate::expr::{ColumnRef, Expr, Literal};
use crate::value::Value;

/// A rendered statement: SQL text plus its bound values in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// SQL text.
    pub sql: String,
    /// Bound values; `binds[i]` belongs to placeholder `i + 1`.
    pub binds: Vec<Value>,
}

impl Query {
    /// Creates a query from SQL and binds.
    #[must_use]
    pub fn new(sql: impl Into<String>, binds: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            binds,
        }
    }

    /// Consumes the query and returns the SQL and binds.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.binds)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Where an expression is being written. Decides which literals are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    /// An item of a SELECT column list.
    SelectItem,
    /// A function argument.
    FunctionArg,
    /// An operand of a comparison.
    Operand,
    /// A value of an INSERT row.
    InsertValue,
    /// The `DEFAULT` clause of a column definition.
    ColumnDefault,
}

/// Accumulates SQL text and binds against one dialect.
pub(crate) struct SqlWriter<'d> {
    dialect: &'d dyn Dialect,
    sql: String,
    binds: Vec<Value>,
}

impl<'d> SqlWriter<'d> {
    pub(crate) fn new(dialect: &'d dyn Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            binds: Vec::new(),
        }
    }

    pub(crate) const fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    pub(crate) fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    pub(crate) fn push_identifier(&mut self, name: &str) -> BuildResult<&mut Self> {
        if name.is_empty() {
            return Err(BuildError::EmptyIdentifier);
        }
        let quoted = self.dialect.quote_identifier(name);
        self.sql.push_str(&quoted);
        Ok(self)
    }

    /// Writes `"a", "b", ...`.
    pub(crate) fn push_identifier_list(&mut self, names: &[String]) -> BuildResult<&mut Self> {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_identifier(name)?;
        }
        Ok(self)
    }

    pub(crate) fn push_bind(&mut self, value: Value) -> &mut Self {
        self.binds.push(value);
        let placeholder = self.dialect.placeholder(self.binds.len());
        self.sql.push_str(&placeholder);
        self
    }

    pub(crate) fn push_column(&mut self, column: &ColumnRef) -> BuildResult<&mut Self> {
        if let Some(ref table) = column.table {
            self.push_identifier(table)?;
            self.push(".");
        }
        self.push_identifier(&column.name)
    }

    pub(crate) fn push_literal(
        &mut self,
        literal: &Literal,
        position: Position,
    ) -> BuildResult<&mut Self> {
        match (literal, position) {
            (Literal::All, Position::SelectItem | Position::FunctionArg)
            | (Literal::Default, Position::InsertValue) => {}
            (Literal::All, _) => return Err(BuildError::MisplacedWildcard),
            (Literal::Default, _) => return Err(BuildError::MisplacedDefault),
            _ => {}
        }
        let token = self.dialect.render_literal(literal)?;
        self.sql.push_str(&token);
        Ok(self)
    }

    pub(crate) fn push_expr(&mut self, expr: &Expr, position: Position) -> BuildResult<&mut Self> {
        match expr {
            Expr::Column(column) if position == Position::InsertValue => {
                Err(BuildError::ColumnInValues(column.name.clone()))
            }
            Expr::Column(column) => self.push_column(column),
            Expr::Literal(literal) => self.push_literal(literal, position),
            Expr::Bind(value) => Ok(self.push_bind(value.clone())),
            Expr::Function { name, args } => {
                if name.is_empty() {
                    return Err(BuildError::EmptyIdentifier);
                }
                if !is_function_name(name) {
                    return Err(BuildError::InvalidFunctionName(name.clone()));
                }
                self.push(name);
                self.push("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.push_expr(arg, Position::FunctionArg)?;
                }
                Ok(self.push(")"))
            }
        }
    }

    pub(crate) fn finish(self) -> Query {
        Query {
            sql: self.sql,
            binds: self.binds,
        }
    }
}

/// `count`, `pg_catalog.lower`: dot-separated words of letters, digits and
/// underscores, each starting with a letter or underscore.
fn is_function_name(name: &str) -> bool {
    name.split('.').all(|part| {
        part.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
            && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySqlDialect, PostgresDialect, SqliteDialect};
    use crate::expr::{bind, col, func};

    fn render(dialect: &dyn Dialect, expr: &Expr, position: Position) -> BuildResult<Query> {
        let mut w = SqlWriter::new(dialect);
        w.push_expr(expr, position)?;
        Ok(w.finish())
    }

    #[test]
    fn test_count_star_consumes_no_binds() {
        let q = render(
            &PostgresDialect::new(),
            &func("count", [Literal::All]),
            Position::SelectItem,
        )
        .unwrap();
        assert_eq!(q.sql, "count(*)");
        assert!(q.binds.is_empty());
    }

    #[test]
    fn test_count_column() {
        let q = render(&SqliteDialect::new(), &func("count", ["name"]), Position::SelectItem)
            .unwrap();
        assert_eq!(q.sql, "count(\"name\")");
        let q = render(&MySqlDialect::new(), &func("count", ["name"]), Position::SelectItem)
            .unwrap();
        assert_eq!(q.sql, "count(`name`)");
    }

    #[test]
    fn test_bind_placeholders_are_numbered() {
        let dialect = PostgresDialect::new();
        let mut w = SqlWriter::new(&dialect);
        w.push_expr(&bind("Milky Way"), Position::Operand).unwrap();
        w.push(", ");
        w.push_expr(&bind(5), Position::Operand).unwrap();
        let q = w.finish();
        assert_eq!(q.sql, "$1, $2");
        assert_eq!(
            q.binds,
            vec![Value::Text(String::from("Milky Way")), Value::Int(5)]
        );
    }

    #[test]
    fn test_wildcard_only_in_lists() {
        let dialect = SqliteDialect::new();
        assert_eq!(
            render(&dialect, &col("*"), Position::Operand),
            Err(BuildError::MisplacedWildcard)
        );
        assert_eq!(
            render(&dialect, &col("*"), Position::InsertValue),
            Err(BuildError::MisplacedWildcard)
        );
        assert_eq!(render(&dialect, &col("*"), Position::SelectItem).unwrap().sql, "*");
    }

    #[test]
    fn test_default_only_in_insert_values() {
        let dialect = PostgresDialect::new();
        let default = Expr::Literal(Literal::Default);
        assert_eq!(
            render(&dialect, &default, Position::Operand),
            Err(BuildError::MisplacedDefault)
        );
        let q = render(&dialect, &default, Position::InsertValue).unwrap();
        assert_eq!(q.sql, "DEFAULT");
        assert!(q.binds.is_empty());
    }

    #[test]
    fn test_column_rejected_as_insert_value() {
        assert_eq!(
            render(&PostgresDialect::new(), &col("name"), Position::InsertValue),
            Err(BuildError::ColumnInValues(String::from("name")))
        );
    }

    #[test]
    fn test_qualified_column() {
        let q = render(
            &PostgresDialect::new(),
            &ColumnRef::qualified("planets", "name").into(),
            Position::Operand,
        )
        .unwrap();
        assert_eq!(q.sql, "\"planets\".\"name\"");
    }

    #[test]
    fn test_function_name_is_checked() {
        let dialect = PostgresDialect::new();
        let q = render(
            &dialect,
            &func("pg_catalog.lower", ["name"]),
            Position::SelectItem,
        )
        .unwrap();
        assert_eq!(q.sql, "pg_catalog.lower(\"name\")");

        for name in ["count(*); DROP TABLE planets; --", "1st", "a..b", "count "] {
            assert_eq!(
                render(&dialect, &func(name, [Literal::All]), Position::SelectItem),
                Err(BuildError::InvalidFunctionName(String::from(name))),
                "{name}"
            );
        }
    }

    #[test]
    fn test_empty_identifier_rejected() {
        assert_eq!(
            render(&SqliteDialect::new(), &col(""), Position::Operand),
            Err(BuildError::EmptyIdentifier)
        );
    }
}
