//! Column data types.
//!
//! A [`DataType`] is dialect-neutral. Each [`Dialect`](crate::dialect::Dialect)
//! decides how (and whether) a type is spelled.

use core::fmt;

/// SQL column data types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// Small integer (2 bytes).
    Smallint,
    /// Integer (4 bytes).
    Int,
    /// Big integer (8 bytes).
    Bigint,
    /// Real (4-byte float).
    Real,
    /// Double precision (8-byte float).
    Double,
    /// Text (variable length, no limit).
    Text,
    /// Variable-length character string.
    Varchar(u32),
    /// Binary large object.
    Blob,
    /// Boolean.
    Boolean,
    /// Date.
    Date,
    /// Timestamp.
    Timestamp,
    /// UUID.
    Uuid,
    /// JSON document.
    Json,
    /// A type token passed through verbatim.
    Custom(String),
}

impl DataType {
    /// Creates a custom type token.
    #[must_use]
    pub fn custom(token: impl Into<String>) -> Self {
        Self::Custom(token.into())
    }

    /// Returns whether a custom token looks like a SQL type name, e.g.
    /// `NUMERIC(10, 2)` or `DOUBLE PRECISION`.
    #[must_use]
    pub fn is_valid_token(token: &str) -> bool {
        !token.trim().is_empty()
            && token.chars().all(|c| {
                c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | '(' | ')' | ',')
            })
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Smallint => f.write_str("SMALLINT"),
            Self::Int => f.write_str("INT"),
            Self::Bigint => f.write_str("BIGINT"),
            Self::Real => f.write_str("REAL"),
            Self::Double => f.write_str("DOUBLE"),
            Self::Text => f.write_str("TEXT"),
            Self::Varchar(n) => write!(f, "VARCHAR({n})"),
            Self::Blob => f.write_str("BLOB"),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Date => f.write_str("DATE"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
            Self::Uuid => f.write_str("UUID"),
            Self::Json => f.write_str("JSON"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}
