//! Postgres [`Database`] implementation.

pub mod connection;
mod impls;

use deadpool_postgres::Runtime;
use derive_more::{Display, Error as StdError, From};
use tokio_postgres::NoTls;
use tracerr::Traced;

use crate::infra::database;
#[cfg(doc)]
use crate::infra::Database;

pub use refinery::embed_migrations;

pub use self::connection::{Connection, Params};

pub use deadpool_postgres::{Config, PoolConfig, Timeouts};

/// Postgres [`Database`] client acting as the property store.
///
/// Every operation checks out its own [`connection::Pooled`], so a lost
/// connection only fails the operations running on it.
#[derive(Clone, Debug)]
pub struct Postgres {
    /// [`connection::Pool`] to check out [`Connection`]s from.
    pool: connection::Pool,
}

impl Postgres {
    /// Creates a new [`Postgres`] client with the provided [`Config`].
    ///
    /// No connection is established until the first query.
    ///
    /// # Errors
    ///
    /// If failed to create a new [`connection::Pool`].
    pub fn new(conf: &Config) -> Result<Self, Traced<database::Error>> {
        let pool = conf
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self { pool })
    }

    /// Checks out a [`connection::Pooled`] from the [`connection::Pool`].
    ///
    /// # Errors
    ///
    /// If Postgres is unreachable, or no [`Connection`] is released in time.
    pub async fn checkout(
        &self,
    ) -> Result<connection::Pooled, Traced<database::Error>> {
        self.pool.get().await.map_err(|e| {
            let status = self.pool.status();
            tracing::warn!(
                available = status.available,
                size = status.size,
                waiting = status.waiting,
                "failed to check out Postgres connection: {e}",
            );
            tracerr::new!(database::Error::from(Error::from(e)))
        })
    }
}

impl Connection for Postgres {
    async fn rows(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> Result<Vec<tokio_postgres::Row>, Traced<database::Error>> {
        self.checkout()
            .await
            .map_err(tracerr::wrap!())?
            .rows(sql, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn row(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> Result<Option<tokio_postgres::Row>, Traced<database::Error>> {
        self.checkout()
            .await
            .map_err(tracerr::wrap!())?
            .row(sql, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn exec(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> Result<u64, Traced<database::Error>> {
        self.checkout()
            .await
            .map_err(tracerr::wrap!())?
            .exec(sql, params)
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Postgres database [`Error`].
#[derive(Debug, Display, StdError, From)]
pub enum Error {
    /// [`Connection`] error.
    #[display("`Connection` error: {_0}")]
    Connection(connection::Error),

    /// Error of creating a new [`connection::Pool`].
    #[display("Failed to create a new `connection::Pool`: {_0}")]
    PoolCreation(connection::PoolCreationError),

    /// [`connection::Pool`] error.
    #[display("`connection::Pool` error: {_0}")]
    Pool(connection::PoolError),

    /// Stored row doesn't satisfy domain invariants.
    #[display("Malformed `{table}` row: {reason}")]
    #[from(ignore)]
    MalformedRow {
        /// Table the row belongs to.
        table: &'static str,

        /// What exactly is malformed.
        reason: String,
    },
}
