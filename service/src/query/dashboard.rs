//! [`Query`] for the landlord dashboard.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{landlord, Property},
    infra::{database, Database},
    read::property::{Criteria, Stats},
    Service,
};

use super::Query;

/// [`Query`] returning the [`Property`]s of a landlord matching the
/// [`Criteria`] along with [`Stats`] over all of them.
///
/// Unlike [`Browse`], inactive [`Property`]s are included.
///
/// [`Browse`]: super::Browse
#[derive(Clone, Debug)]
pub struct Dashboard {
    /// ID of the landlord to show the dashboard of.
    pub landlord_id: landlord::Id,

    /// [`Criteria`] to filter and sort the listings by.
    pub criteria: Criteria,
}

/// Result of the [`Dashboard`] [`Query`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Listings matching the [`Criteria`], in its order.
    pub listings: Vec<Property>,

    /// [`Stats`] over all the listings, regardless of the [`Criteria`].
    pub stats: Stats,
}

impl<Db> Query<Dashboard> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Property>, landlord::Id>>,
        Ok = Vec<Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<database::Error>;

    async fn execute(&self, query: Dashboard) -> Result<Self::Ok, Self::Err> {
        let Dashboard {
            landlord_id,
            criteria,
        } = query;

        let own = self
            .database()
            .execute(Select(By::new(landlord_id)))
            .await
            .map_err(tracerr::wrap!())?;

        let stats = Stats::of(&own);
        let listings = criteria.apply(own);
        tracing::debug!(
            %landlord_id,
            total = stats.total_listings,
            matched = listings.len(),
            "built landlord dashboard",
        );

        Ok(Output { listings, stats })
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::{
        domain::{landlord, property::Status},
        infra::database::memory::Memory,
        read::property::{
            tests::{property, tags},
            Criteria, SortKey,
        },
        Service,
    };

    use super::{Dashboard, Query as _};

    #[tokio::test]
    async fn lists_own_listings_of_any_status() {
        let (me, other) = (landlord::Id::new(), landlord::Id::new());
        let service = Service::new(Memory::with([
            property("mine")
                .landlord(me)
                .price(800_000)
                .counters(156, 8)
                .created_at(1_700_000_000)
                .build(),
            property("hidden")
                .landlord(me)
                .price(1_200_000)
                .counters(89, 12)
                .status(Status::Inactive)
                .build(),
            property("theirs").landlord(other).build(),
        ]));

        let out = service
            .execute(Dashboard {
                landlord_id: me,
                criteria: Criteria::default(),
            })
            .await
            .unwrap();

        assert_eq!(tags(&out.listings), ["mine", "hidden"]);
        assert_eq!(out.stats.total_listings, 2);
        assert_eq!(out.stats.active_listings, 1);
        assert_eq!(out.stats.total_views, 245);
        assert_eq!(out.stats.total_inquiries, 20);
        assert_eq!(out.stats.average_price.amount(), Decimal::from(1_000_000));
    }

    #[tokio::test]
    async fn stats_ignore_criteria() {
        let me = landlord::Id::new();
        let service = Service::new(Memory::with([
            property("a").landlord(me).price(300_000).build(),
            property("b").landlord(me).price(900_000).build(),
        ]));

        let out = service
            .execute(Dashboard {
                landlord_id: me,
                criteria: Criteria {
                    price_max: Some(Decimal::from(500_000)),
                    sort_key: SortKey::PriceHigh,
                    ..Criteria::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(tags(&out.listings), ["a"]);
        assert_eq!(out.stats.total_listings, 2);
        assert_eq!(out.stats.average_price.amount(), Decimal::from(600_000));
    }

    #[tokio::test]
    async fn empty_dashboard_has_zero_stats() {
        let service = Service::new(Memory::default());

        let out = service
            .execute(Dashboard {
                landlord_id: landlord::Id::new(),
                criteria: Criteria::default(),
            })
            .await
            .unwrap();

        assert!(out.listings.is_empty());
        assert_eq!(out.stats.total_listings, 0);
        assert!(out.stats.average_price.amount().is_zero());
    }
}
