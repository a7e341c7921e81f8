//! MySQL dialect.

use super::{AlterTableSyntax, Dialect, ModifyColumnSyntax};
use crate::types::DataType;

/// MySQL dialect: backtick identifiers, `?` placeholders, batched ALTER TABLE.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    // Backslash is an escape character inside MySQL string literals.
    fn literal_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn type_name(&self, data_type: &DataType) -> Option<String> {
        let name = match data_type {
            DataType::Smallint => "SMALLINT",
            DataType::Int => "INT",
            DataType::Bigint => "BIGINT",
            DataType::Real => "FLOAT",
            DataType::Double => "DOUBLE",
            DataType::Text => "TEXT",
            DataType::Varchar(n) => return Some(format!("VARCHAR({n})")),
            DataType::Blob => "BLOB",
            DataType::Boolean => "BOOLEAN",
            DataType::Date => "DATE",
            DataType::Timestamp => "TIMESTAMP",
            DataType::Json => "JSON",
            DataType::Uuid => return None,
            DataType::Custom(name) => return Some(name.clone()),
        };
        Some(String::from(name))
    }

    fn alter_table_syntax(&self) -> AlterTableSyntax {
        AlterTableSyntax {
            add_column: true,
            drop_column: true,
            modify_column: Some(ModifyColumnSyntax {
                clause: "MODIFY COLUMN",
                type_keyword: None,
            }),
            allows_batch: true,
        }
    }

    // Accepted and ignored by MySQL.
    fn supports_drop_cascade(&self) -> bool {
        true
    }

    fn supports_index_if_not_exists(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_quoting() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.quote_identifier("galaxies"), "`galaxies`");
        assert_eq!(dialect.quote_identifier("a`b"), "`a``b`");
        assert_eq!(dialect.placeholder(3), "?");
    }

    #[test]
    fn test_mysql_string_escaping() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.literal_string(r"C:\stars"), r"'C:\\stars'");
        assert_eq!(dialect.literal_string("it's"), "'it''s'");
    }

    #[test]
    fn test_mysql_rejects_uuid() {
        let dialect = MySqlDialect::new();
        assert!(dialect.type_name(&DataType::Uuid).is_none());
        assert_eq!(dialect.type_name(&DataType::Int).unwrap(), "INT");
    }

    #[test]
    fn test_mysql_index_if_not_exists_unsupported() {
        let dialect = MySqlDialect::new();
        assert!(dialect.supports_if_not_exists());
        assert!(!dialect.supports_index_if_not_exists());
    }
}
