//! Landlord [`Dashboard`] definitions.

use common::Money;
use derive_more::{From, Into};
use juniper::graphql_object;
use service::{query, read};

use crate::{api, AsError, Context, Error};

/// Listings of a landlord along with their [`Stats`].
#[derive(Clone, Debug, From, Into)]
pub struct Dashboard(query::dashboard::Output);

/// Listings of a landlord along with their statistics.
#[graphql_object(name = "LandlordDashboard", context = Context)]
impl Dashboard {
    /// Listings matching the requested criteria, of any status.
    #[must_use]
    pub fn listings(&self) -> Vec<api::Property> {
        self.0.listings.iter().cloned().map(Into::into).collect()
    }

    /// Statistics over all the listings of the landlord, regardless of the
    /// requested criteria.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.0.stats.into()
    }
}

/// Aggregated figures over the listings of a landlord.
#[derive(Clone, Copy, Debug, From, Into)]
pub struct Stats(read::property::Stats);

/// Aggregated figures over the listings of a landlord.
#[graphql_object(name = "LandlordStats", context = Context)]
impl Stats {
    /// Number of listings, of any status.
    pub fn total_listings(&self) -> Result<i32, Error> {
        count(self.0.total_listings)
    }

    /// Number of listings visible in browse results.
    pub fn active_listings(&self) -> Result<i32, Error> {
        count(self.0.active_listings)
    }

    /// Total views of all the listings.
    pub fn total_views(&self) -> Result<i32, Error> {
        count(self.0.total_views)
    }

    /// Total inquiries about all the listings.
    pub fn total_inquiries(&self) -> Result<i32, Error> {
        count(self.0.total_inquiries)
    }

    /// Mean monthly rent, rounded to whole shillings.
    #[must_use]
    pub fn average_price(&self) -> Money {
        self.0.average_price
    }

    /// Mean monthly rent formatted for display.
    #[must_use]
    pub fn average_price_label(&self) -> String {
        self.0.average_price.to_human()
    }
}

/// Converts a counter into a GraphQL `Int`.
fn count(n: u64) -> Result<i32, Error> {
    i32::try_from(n).map_err(AsError::into_error)
}
