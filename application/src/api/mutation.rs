//! GraphQL [`Mutation`]s definitions.

use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, AsError, Context, Error};

use super::query::PropertyError;

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Lists a new `Property` of the specified landlord.
    ///
    /// The new `Property` is `ACTIVE` right away, with zero views and
    /// inquiries.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PROPERTY` - some of the provided fields are invalid;
    /// - `PROPERTY_STORE_UNAVAILABLE` - the `Property` store cannot be
    ///                                  reached, the request may be retried.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createProperty",
            landlord_id = %landlord_id,
            location = %input.location,
            otel.name = Self::SPAN_NAME,
            price = %input.price,
        ),
    )]
    pub async fn create_property(
        landlord_id: api::landlord::Id,
        input: api::property::PropertyInput,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        let cmd = input.validate(landlord_id).map_err(ctx.error())?;

        ctx.service()
            .execute(cmd)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Changes the provided fields of a `Property` of the specified landlord.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PROPERTY` - some of the provided fields are invalid;
    /// - `PROPERTY_NOT_EXISTS` - the landlord has no `Property` with the
    ///                           specified ID;
    /// - `PROPERTY_STORE_UNAVAILABLE` - the `Property` store cannot be
    ///                                  reached, the request may be retried.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateProperty",
            id = %id,
            landlord_id = %landlord_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_property(
        landlord_id: api::landlord::Id,
        id: api::property::Id,
        patch: api::property::PropertyPatch,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        let cmd = patch.validate(id, landlord_id).map_err(ctx.error())?;

        ctx.service()
            .execute(cmd)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Removes a `Property` of the specified landlord completely.
    ///
    /// Returns the removed `Property`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the landlord has no `Property` with the
    ///                           specified ID;
    /// - `PROPERTY_STORE_UNAVAILABLE` - the `Property` store cannot be
    ///                                  reached, the request may be retried.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteProperty",
            id = %id,
            landlord_id = %landlord_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_property(
        landlord_id: api::landlord::Id,
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(command::DeleteProperty {
                property_id: id.into(),
                landlord_id: landlord_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Shows or hides a `Property` of the specified landlord in browse
    /// results.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the landlord has no `Property` with the
    ///                           specified ID;
    /// - `PROPERTY_STORE_UNAVAILABLE` - the `Property` store cannot be
    ///                                  reached, the request may be retried.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "setPropertyStatus",
            id = %id,
            landlord_id = %landlord_id,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn set_property_status(
        landlord_id: api::landlord::Id,
        id: api::property::Id,
        status: api::property::Status,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(command::SetPropertyStatus {
                property_id: id.into(),
                landlord_id: landlord_id.into(),
                status: status.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Adds the `Property` to the provided `favorites` of the viewer, or
    /// removes it from there if it's already favorited.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "toggleFavorite",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn toggle_favorite(
        favorites: Vec<api::property::Id>,
        id: api::property::Id,
    ) -> api::favorites::Toggle {
        api::favorites::Toggle::apply(favorites, id)
    }
}

impl AsError for command::update_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(PropertyError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(PropertyError::NotExists.into()),
        }
    }
}

impl AsError for command::set_property_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => Some(PropertyError::NotExists.into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{
        command::delete_property::ExecutionError, domain::property,
    };

    use crate::AsError as _;

    #[test]
    fn missing_property_is_not_found() {
        let err = ExecutionError::PropertyNotExists(property::Id::new())
            .as_error();

        assert_eq!(err.code, "PROPERTY_NOT_EXISTS");
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
    }
}
