//! Property store [`Database`] implementations.

#[cfg(test)]
pub(crate) mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Operation on the property store.
pub use common::Handler as Database;

/// Error of the property store.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Postgres`] store error.
    #[cfg(feature = "postgres")]
    Postgres(postgres::Error),
}

impl Error {
    /// Indicates whether the property store couldn't be reached, so the failed
    /// operation may succeed when retried later.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match *self {
            #[cfg(feature = "postgres")]
            Self::Postgres(ref e) => {
                !matches!(e, postgres::Error::MalformedRow { .. })
            }
        }
    }
}
