//! The connection collaborator.
//!
//! A [`Connection`] receives rendered [`Query`] values and talks to the
//! database. Implementations must not retry or wrap statements in
//! transactions; failures are handed back unchanged.

use std::convert::Infallible;
use std::sync::{Mutex, PoisonError};

use futures::future::{self, BoxFuture, FutureExt};
use futures::stream::{self, BoxStream, StreamExt};

use crate::query::Query;

/// Executes rendered statements.
pub trait Connection: Send + Sync {
    /// A result row.
    type Row: Send;
    /// The driver's error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Runs a statement that returns no rows.
    fn execute(&self, query: Query) -> BoxFuture<'_, Result<(), Self::Error>>;

    /// Runs a statement and streams its rows.
    fn fetch(&self, query: Query) -> BoxStream<'_, Result<Self::Row, Self::Error>>;
}

/// A connection that only records what it is given.
///
/// `execute` always succeeds and `fetch` yields no rows. Useful for printing
/// the statements a program would run.
#[derive(Debug, Default)]
pub struct DryRun {
    queries: Mutex<Vec<Query>>,
}

impl DryRun {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every statement received so far.
    #[must_use]
    pub fn queries(&self) -> Vec<Query> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns every statement received so far.
    pub fn take(&self) -> Vec<Query> {
        std::mem::take(&mut *self.queries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn record(&self, query: Query) {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query);
    }
}

impl Connection for DryRun {
    type Row = Infallible;
    type Error = Infallible;

    fn execute(&self, query: Query) -> BoxFuture<'_, Result<(), Self::Error>> {
        self.record(query);
        future::ready(Ok(())).boxed()
    }

    fn fetch(&self, query: Query) -> BoxStream<'_, Result<Self::Row, Self::Error>> {
        self.record(query);
        stream::empty().boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    #[tokio::test]
    async fn test_dry_run_records_in_order() {
        let conn = DryRun::new();
        conn.execute(Query::new("DROP TABLE \"a\"", vec![]))
            .await
            .unwrap();
        let rows: Vec<Infallible> = conn
            .fetch(Query::new("SELECT * FROM \"a\"", vec![]))
            .try_collect()
            .await
            .unwrap();
        assert!(rows.is_empty());

        let sql: Vec<String> = conn.take().into_iter().map(|q| q.sql).collect();
        assert_eq!(sql, ["DROP TABLE \"a\"", "SELECT * FROM \"a\""]);
        assert!(conn.queries().is_empty());
    }
}
