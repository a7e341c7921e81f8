//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. A [`Dialect`] is a
//! read-only table of formatting rules and capability flags; statement
//! builders consult it and never assume a capability.

mod mysql;
mod postgres;
mod sqlite;

use core::fmt;

pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

use crate::error::{BuildError, BuildResult};
use crate::expr::Literal;
use crate::types::DataType;

/// Bind placeholder syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Positional `?`.
    Question,
    /// Numbered `$1`, `$2`, ...
    Dollar,
}

/// How a dialect spells "change this column's type".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifyColumnSyntax {
    /// Clause introducing the change, e.g. `ALTER COLUMN` or `MODIFY COLUMN`.
    pub clause: &'static str,
    /// Keyword between the column name and the new type, e.g. `SET DATA TYPE`.
    pub type_keyword: Option<&'static str>,
}

/// ALTER TABLE capabilities of a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlterTableSyntax {
    /// `ADD COLUMN` is supported.
    pub add_column: bool,
    /// `DROP COLUMN` is supported.
    pub drop_column: bool,
    /// Column type changes, if supported.
    pub modify_column: Option<ModifyColumnSyntax>,
    /// Several changes may share one `ALTER TABLE` statement.
    pub allows_batch: bool,
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Quotes an identifier, doubling any embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(quote);
        for c in name.chars() {
            if c == quote {
                quoted.push(quote);
            }
            quoted.push(c);
        }
        quoted.push(quote);
        quoted
    }

    /// Returns the placeholder syntax.
    fn placeholder_style(&self) -> Placeholder {
        Placeholder::Question
    }

    /// Returns the placeholder for the bind at `position` (1-based).
    fn placeholder(&self, position: usize) -> String {
        match self.placeholder_style() {
            Placeholder::Question => String::from("?"),
            Placeholder::Dollar => format!("${position}"),
        }
    }

    /// Returns the token that tells the database to use a column's default.
    fn literal_default(&self) -> &'static str {
        "DEFAULT"
    }

    /// Returns the boolean literal.
    fn literal_boolean(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// Returns a quoted string literal.
    fn literal_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Renders a literal as a single SQL token.
    fn render_literal(&self, literal: &Literal) -> BuildResult<String> {
        match literal {
            Literal::Default => Ok(String::from(self.literal_default())),
            Literal::Null => Ok(String::from("NULL")),
            Literal::String(s) => Ok(self.literal_string(s)),
            Literal::Integer(n) => Ok(n.to_string()),
            Literal::Float(f) if f.is_finite() => Ok(format!("{f:?}")),
            Literal::Float(_) => Err(BuildError::NonFiniteNumber),
            Literal::Boolean(b) => Ok(String::from(self.literal_boolean(*b))),
            Literal::All => Ok(String::from("*")),
        }
    }

    /// Maps a data type to this dialect's spelling, or `None` if the type is
    /// not supported.
    fn type_name(&self, data_type: &DataType) -> Option<String>;

    /// Returns the ALTER TABLE capabilities.
    fn alter_table_syntax(&self) -> AlterTableSyntax;

    /// Returns whether several column changes may share one ALTER TABLE.
    fn supports_batch_alter(&self) -> bool {
        self.alter_table_syntax().allows_batch
    }

    /// Returns whether `DROP TABLE IF EXISTS` is accepted.
    fn supports_if_exists(&self) -> bool {
        true
    }

    /// Returns whether `CREATE ... IF NOT EXISTS` is accepted.
    fn supports_if_not_exists(&self) -> bool {
        true
    }

    /// Returns whether `CREATE INDEX IF NOT EXISTS` is accepted.
    fn supports_index_if_not_exists(&self) -> bool {
        self.supports_if_not_exists()
    }

    /// Returns whether `DROP TABLE ... CASCADE` is accepted.
    fn supports_drop_cascade(&self) -> bool {
        false
    }
}

/// Resolves a data type against a dialect, rejecting malformed custom tokens
/// and types the dialect cannot represent.
pub fn resolve_type(dialect: &dyn Dialect, data_type: &DataType) -> BuildResult<String> {
    if let DataType::Custom(token) = data_type {
        if !DataType::is_valid_token(token) {
            return Err(BuildError::InvalidTypeToken(token.clone()));
        }
    }
    dialect
        .type_name(data_type)
        .ok_or_else(|| BuildError::UnsupportedType {
            dialect: dialect.name(),
            data_type: data_type.to_string(),
        })
}

/// Looks up a dialect by name (`postgres`, `postgresql`, `mysql`, `sqlite`).
#[must_use]
pub fn by_name(name: &str) -> Option<Box<dyn Dialect>> {
    match name.to_ascii_lowercase().as_str() {
        "postgres" | "postgresql" => Some(Box::new(PostgresDialect::new())),
        "mysql" => Some(Box::new(MySqlDialect::new())),
        "sqlite" => Some(Box::new(SqliteDialect::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier_escapes() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.quote_identifier("planets"), "\"planets\"");
        assert_eq!(dialect.quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_render_literal_defaults() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.render_literal(&Literal::Null).unwrap(), "NULL");
        assert_eq!(dialect.render_literal(&Literal::Integer(-7)).unwrap(), "-7");
        assert_eq!(dialect.render_literal(&Literal::Float(1.5)).unwrap(), "1.5");
        assert_eq!(dialect.render_literal(&Literal::Float(1.0)).unwrap(), "1.0");
        assert_eq!(dialect.render_literal(&Literal::Float(-2.0)).unwrap(), "-2.0");
        assert_eq!(dialect.render_literal(&Literal::All).unwrap(), "*");
        assert_eq!(
            dialect
                .render_literal(&Literal::string("Unamed Planet"))
                .unwrap(),
            "'Unamed Planet'"
        );
        assert_eq!(
            dialect.render_literal(&Literal::string("it's")).unwrap(),
            "'it''s'"
        );
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let dialect = SqliteDialect::new();
        assert_eq!(
            dialect.render_literal(&Literal::Float(f64::NAN)),
            Err(BuildError::NonFiniteNumber)
        );
        assert_eq!(
            dialect.render_literal(&Literal::Float(f64::INFINITY)),
            Err(BuildError::NonFiniteNumber)
        );
    }

    #[test]
    fn test_resolve_type() {
        let sqlite = SqliteDialect::new();
        assert_eq!(resolve_type(&sqlite, &DataType::Bigint).unwrap(), "INTEGER");
        assert_eq!(
            resolve_type(&sqlite, &DataType::Uuid),
            Err(BuildError::UnsupportedType {
                dialect: "sqlite",
                data_type: String::from("UUID"),
            })
        );
        assert_eq!(
            resolve_type(&sqlite, &DataType::custom("TEXT; --")),
            Err(BuildError::InvalidTypeToken(String::from("TEXT; --")))
        );
        assert_eq!(
            resolve_type(&sqlite, &DataType::custom("NUMERIC(10, 2)")).unwrap(),
            "NUMERIC(10, 2)"
        );
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("postgres").unwrap().name(), "postgresql");
        assert_eq!(by_name("MySQL").unwrap().name(), "mysql");
        assert_eq!(by_name("sqlite").unwrap().name(), "sqlite");
        assert!(by_name("oracle").is_none());
    }

    #[test]
    fn test_batch_capability() {
        assert!(PostgresDialect::new().supports_batch_alter());
        assert!(MySqlDialect::new().supports_batch_alter());
        assert!(!SqliteDialect::new().supports_batch_alter());
    }
}
