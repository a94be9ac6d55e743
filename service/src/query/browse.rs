//! [`Query`] for browsing the listed [`Property`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Property,
    infra::{database, Database},
    read::property::{Active, Criteria},
    Service,
};

use super::Query;

/// [`Query`] returning the active [`Property`]s matching the [`Criteria`],
/// in the order of its [`SortKey`].
///
/// [`SortKey`]: crate::read::property::SortKey
#[derive(Clone, Debug, Default)]
pub struct Browse {
    /// [`Criteria`] to filter and sort by.
    pub criteria: Criteria,
}

impl<Db> Query<Browse> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Property>, Active>>,
        Ok = Vec<Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(&self, query: Browse) -> Result<Self::Ok, Self::Err> {
        let Browse { criteria } = query;

        let active = self
            .database()
            .execute(Select(By::new(Active)))
            .await
            .map_err(tracerr::wrap!())?;
        let fetched = active.len();

        let matched = criteria.apply(active);
        tracing::debug!(
            fetched,
            matched = matched.len(),
            sort = %criteria.sort_key,
            "browsed properties",
        );

        Ok(matched)
    }
}
