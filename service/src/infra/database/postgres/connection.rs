//! [`Connection`] definitions.

use std::future::Future;

use tokio_postgres::{types::ToSql, Row};
use tracerr::Traced;

use crate::infra::database::{self, postgres};

pub use deadpool_postgres::{
    Client as Pooled, CreatePoolError as PoolCreationError, Pool, PoolError,
};
pub use tokio_postgres::Error;

/// Parameters bound to a SQL statement.
pub type Params<'p> = [&'p (dyn ToSql + Sync)];

/// Connection to Postgres able to run SQL statements.
///
/// Statements are prepared once per physical connection and reused
/// afterwards.
pub trait Connection {
    /// Runs the provided `sql` statement returning all the resulting rows.
    ///
    /// # Errors
    ///
    /// If the statement fails to be prepared or run.
    fn rows(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> impl Future<Output = Result<Vec<Row>, Traced<database::Error>>>;

    /// Runs the provided `sql` statement returning at most one resulting row.
    ///
    /// # Errors
    ///
    /// If the statement fails to be prepared or run, or returns more than one
    /// row.
    fn row(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> impl Future<Output = Result<Option<Row>, Traced<database::Error>>>;

    /// Runs the provided `sql` statement returning the number of affected
    /// rows.
    ///
    /// # Errors
    ///
    /// If the statement fails to be prepared or run.
    fn exec(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> impl Future<Output = Result<u64, Traced<database::Error>>>;
}

impl Connection for Pooled {
    async fn rows(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> Result<Vec<Row>, Traced<database::Error>> {
        let stmt = self
            .prepare_cached(sql)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)?;
        self.query(&stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn row(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> Result<Option<Row>, Traced<database::Error>> {
        let stmt = self
            .prepare_cached(sql)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)?;
        self.query_opt(&stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn exec(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> Result<u64, Traced<database::Error>> {
        let stmt = self
            .prepare_cached(sql)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)?;
        self.execute(&stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}
