#![allow(dead_code)]

use oxide_sqlkit_core::dialect::{MySqlDialect, PostgresDialect, SqliteDialect};
use oxide_sqlkit_core::{Database, Dialect, DryRun, Query};

pub fn postgres() -> Database<DryRun> {
    Database::new(PostgresDialect::new(), DryRun::new())
}

pub fn mysql() -> Database<DryRun> {
    Database::new(MySqlDialect::new(), DryRun::new())
}

pub fn sqlite() -> Database<DryRun> {
    Database::new(SqliteDialect::new(), DryRun::new())
}

pub fn all_dialects() -> Vec<Database<DryRun>> {
    vec![postgres(), mysql(), sqlite()]
}

/// Returns the SQL text of everything the dry run received, in order.
pub fn sent_sql(db: &Database<DryRun>) -> Vec<String> {
    db.connection()
        .take()
        .into_iter()
        .map(Query::into_parts)
        .map(|(sql, _)| sql)
        .collect()
}

/// Quotes an identifier the way `dialect` does, for building expected SQL.
pub fn q(dialect: &dyn Dialect, name: &str) -> String {
    dialect.quote_identifier(name)
}
