//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, read::property::PriceRange, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Property` with the specified ID, of any status.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does
    ///                           not exist;
    /// - `PROPERTY_STORE_UNAVAILABLE` - the `Property` store cannot be
    ///                                  reached, the request may be retried.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "property",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn property(
        id: api::property::Id,
        favorites: Option<Vec<api::property::Id>>,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        let favorites =
            api::favorites::collect(favorites.unwrap_or_default());
        ctx.service()
            .execute(query::property::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| PropertyError::NotExists.into())
            .map_err(ctx.error())
            .map(|p| api::Property::new(p, &favorites))
    }

    /// Browses the active `Property` listings matching the provided
    /// `criteria`, in the requested order.
    ///
    /// `favorites` are the IDs of the `Property`s favorited by the viewer.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_BROWSE_PARAMS` - a price criterion is malformed (strict
    ///                             mode only);
    /// - `PROPERTY_STORE_UNAVAILABLE` - the `Property` store cannot be
    ///                                  reached, the request may be retried.
    #[tracing::instrument(
        skip_all,
        fields(
            criteria = ?criteria,
            gql.name = "browse",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn browse(
        criteria: Option<api::CriteriaInput>,
        favorites: Option<Vec<api::property::Id>>,
        ctx: &Context,
    ) -> Result<api::BrowseResult, Error> {
        let criteria = criteria
            .unwrap_or_default()
            .parse(ctx.strictness())
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let favorites =
            api::favorites::collect(favorites.unwrap_or_default());

        let matched = ctx
            .service()
            .execute(query::Browse {
                criteria: criteria.clone(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        Ok(api::BrowseResult::new(matched, criteria, &favorites))
    }

    /// Returns the price buckets offered for browsing.
    #[must_use]
    pub fn price_ranges() -> Vec<api::criteria::PriceRangeOption> {
        PriceRange::presets().into_iter().map(Into::into).collect()
    }

    /// Returns the dashboard of the specified landlord: the landlord's
    /// listings of any status matching the provided `criteria`, along with
    /// statistics over all of them.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_BROWSE_PARAMS` - a price criterion is malformed (strict
    ///                             mode only);
    /// - `PROPERTY_STORE_UNAVAILABLE` - the `Property` store cannot be
    ///                                  reached, the request may be retried.
    #[tracing::instrument(
        skip_all,
        fields(
            criteria = ?criteria,
            gql.name = "landlordDashboard",
            landlord_id = %landlord_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn landlord_dashboard(
        landlord_id: api::landlord::Id,
        criteria: Option<api::CriteriaInput>,
        ctx: &Context,
    ) -> Result<api::Dashboard, Error> {
        let criteria = criteria
            .unwrap_or_default()
            .parse(ctx.strictness())
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.service()
            .execute(query::Dashboard {
                landlord_id: landlord_id.into(),
                criteria,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum PropertyError {
        #[code = "PROPERTY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Property` with the specified ID does not exist"]
        NotExists,
    }
}
