//! Error types for statement building and execution.

use thiserror::Error;

/// Misuse of a statement builder, detected before any SQL reaches the
/// database.
///
/// Builders record the first misuse and report it when the statement is
/// rendered. Nothing is silently corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The statement was already rendered (or executed).
    #[error("{statement} statement has already been rendered")]
    AlreadyRendered {
        /// Statement kind, e.g. `SELECT`.
        statement: &'static str,
    },

    /// An INSERT row does not match the column list.
    #[error("INSERT row {row} has {found} values but {expected} columns were given")]
    ArityMismatch {
        /// Zero-based row index.
        row: usize,
        /// Number of columns.
        expected: usize,
        /// Number of values in the offending row.
        found: usize,
    },

    /// The column type has no representation in the active dialect.
    #[error("data type {data_type} is not supported by the {dialect} dialect")]
    UnsupportedType {
        /// Dialect name.
        dialect: &'static str,
        /// The rejected data type.
        data_type: String,
    },

    /// A custom type token is not a plain SQL type name.
    #[error("invalid type token: {0:?}")]
    InvalidTypeToken(String),

    /// The dialect cannot perform this kind of ALTER TABLE operation.
    #[error("the {dialect} dialect does not support {operation} in ALTER TABLE")]
    UnsupportedAlter {
        /// Dialect name.
        dialect: &'static str,
        /// Operation kind, e.g. `MODIFY COLUMN`.
        operation: &'static str,
    },

    /// Several ALTER TABLE operations were rendered as one statement on a
    /// dialect that only accepts one change per statement.
    #[error(
        "the {dialect} dialect cannot batch {operations} ALTER TABLE operations; \
         render them one per statement instead"
    )]
    BatchAlterUnsupported {
        /// Dialect name.
        dialect: &'static str,
        /// Number of accumulated operations.
        operations: usize,
    },

    /// An optional statement feature the dialect does not have.
    #[error("the {dialect} dialect does not support {feature}")]
    UnsupportedFeature {
        /// Dialect name.
        dialect: &'static str,
        /// Feature, e.g. `DROP TABLE ... CASCADE`.
        feature: &'static str,
    },

    /// `*` used outside a select list or function argument list.
    #[error("wildcard `*` is only valid in a select list or function arguments")]
    MisplacedWildcard,

    /// The default marker used outside an INSERT value list.
    #[error("DEFAULT is only valid as an INSERT value")]
    MisplacedDefault,

    /// A column reference used as an INSERT value.
    #[error("column {0:?} cannot be used as an INSERT value; bind the value instead")]
    ColumnInValues(String),

    /// NaN or infinity cannot be written as a SQL literal.
    #[error("non-finite float cannot be rendered as a SQL literal")]
    NonFiniteNumber,

    /// The statement needs at least one column (or operation).
    #[error("{statement} statement has no columns")]
    NoColumns {
        /// Statement kind.
        statement: &'static str,
    },

    /// A required clause was never supplied.
    #[error("{statement} statement is missing its {clause} clause")]
    MissingClause {
        /// Statement kind.
        statement: &'static str,
        /// Clause name, e.g. `ON`.
        clause: &'static str,
    },

    /// A function name that is not a plain (optionally schema-qualified)
    /// SQL name.
    #[error("invalid function name: {0:?}")]
    InvalidFunctionName(String),

    /// An identifier was empty.
    #[error("identifier must not be empty")]
    EmptyIdentifier,
}

/// Errors returned by terminal operations (`run`, `fetch`, `all`).
///
/// Connection failures are carried unchanged in [`Error::Execution`].
#[derive(Debug, Error)]
pub enum Error<E> {
    /// The statement could not be rendered.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The connection rejected or failed the statement.
    #[error(transparent)]
    Execution(E),

    /// A split ALTER TABLE failed part-way. Statements before the failing one
    /// remain applied.
    #[error("ALTER TABLE failed after {applied} of {total} statements were applied: {source}")]
    PartiallyApplied {
        /// Statements that completed before the failure.
        applied: usize,
        /// Statements in the split sequence.
        total: usize,
        /// The connection error for the failing statement.
        #[source]
        source: E,
    },
}

impl<E> Error<E> {
    /// Returns the build error, if this failure happened before execution.
    #[must_use]
    pub const fn as_build(&self) -> Option<&BuildError> {
        match self {
            Self::Build(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for building statements.
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Result type for executing statements against connection `E`'s error type.
pub type Result<T, E> = std::result::Result<T, Error<E>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_messages() {
        let err = BuildError::ArityMismatch {
            row: 1,
            expected: 2,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "INSERT row 1 has 3 values but 2 columns were given"
        );

        let err = BuildError::BatchAlterUnsupported {
            dialect: "sqlite",
            operations: 3,
        };
        assert!(err.to_string().contains("cannot batch 3 ALTER TABLE operations"));
    }

    #[test]
    fn test_execution_error_is_verbatim() {
        let io = std::io::Error::other("connection reset");
        let err: Error<std::io::Error> = Error::Execution(io);
        assert_eq!(err.to_string(), "connection reset");
        assert!(err.as_build().is_none());
    }

    #[test]
    fn test_build_error_converts() {
        let err: Error<std::io::Error> = BuildError::MisplacedWildcard.into();
        assert_eq!(err.as_build(), Some(&BuildError::MisplacedWildcard));
    }
}
