//! [`Query`] definitions.

pub mod browse;
pub mod dashboard;
pub mod properties;
pub mod property;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{database, Database},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

pub use self::{browse::Browse, dashboard::Dashboard};

/// [`Query`] fetching a `W`hat from the property store as is, by the provided
/// `B`y criterion.
#[derive(Clone, Copy, Debug)]
pub struct Fetch<W, B>(By<W, B>);

impl<W, B> Fetch<W, B> {
    /// Creates a new [`Fetch`] of a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, W, B> Query<Fetch<W, B>> for Service<Db>
where
    Db: Database<Select<By<W, B>>, Ok = W, Err = Traced<database::Error>>,
{
    type Ok = W;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Fetch(by): Fetch<W, B>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}
