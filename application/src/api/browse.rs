//! [`BrowseResult`] definitions.

use juniper::graphql_object;
use service::{domain, read::property::Criteria};

use crate::{
    api::{self, criteria},
    AsError, Context, Error,
};

/// Listings matching browse criteria.
#[derive(Clone, Debug)]
pub struct BrowseResult {
    /// Matched listings, in the requested order.
    pub properties: Vec<api::Property>,

    /// [`Criteria`] the listings were matched against.
    pub criteria: Criteria,
}

impl BrowseResult {
    /// Creates a new [`BrowseResult`] out of the matched [`domain::Property`]s,
    /// marking the ones in [`domain::Favorites`].
    #[must_use]
    pub fn new(
        matched: Vec<domain::Property>,
        criteria: Criteria,
        favorites: &domain::Favorites,
    ) -> Self {
        Self {
            properties: matched
                .into_iter()
                .map(|p| api::Property::new(p, favorites))
                .collect(),
            criteria,
        }
    }
}

/// Listings matching browse criteria.
#[graphql_object(context = Context)]
impl BrowseResult {
    /// Matched listings, in the requested order.
    #[must_use]
    pub fn properties(&self) -> &[api::Property] {
        &self.properties
    }

    /// Number of matched listings.
    pub fn total(&self) -> Result<i32, Error> {
        i32::try_from(self.properties.len()).map_err(AsError::into_error)
    }

    /// Criteria currently constraining the listings.
    #[must_use]
    pub fn active_filters(&self) -> Vec<criteria::ActiveFilter> {
        self.criteria
            .active_filters()
            .into_iter()
            .map(Into::into)
            .collect()
    }

    /// Order of the listings.
    #[must_use]
    pub fn sort(&self) -> criteria::SortKey {
        self.criteria.sort_key.into()
    }
}
