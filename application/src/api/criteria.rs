//! Browse [`CriteriaInput`] definitions.

use derive_more::{From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject};
use service::read::property::{
    self as read, Criteria, Params, PriceRange, Strictness, ValidationError,
};

use crate::{
    api::property::{NearbyService, Utility},
    Context,
};

/// Criteria to filter and sort `Property` listings by.
///
/// Every omitted field leaves the listings unconstrained.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "BrowseCriteria")]
pub struct CriteriaInput {
    /// Case-insensitive substring of the `Property` location.
    pub location: Option<String>,

    /// Price bucket, like `500000-1000000` or `5000000+`.
    pub price_range: Option<String>,

    /// Lowest monthly rent, inclusive.
    pub min_price: Option<String>,

    /// Highest monthly rent, inclusive.
    pub max_price: Option<String>,

    /// Utilities every listing must be connected to.
    pub utilities: Option<Vec<Utility>>,

    /// Services every listing must be near.
    pub nearby_services: Option<Vec<NearbyService>>,

    /// Order of the listings, `NEWEST` by default.
    pub sort: Option<SortKey>,
}

impl CriteriaInput {
    /// Parses this [`CriteriaInput`] into [`Criteria`].
    ///
    /// # Errors
    ///
    /// With [`Strictness::Strict`] only, if a price parameter is malformed.
    pub fn parse(
        self,
        strictness: Strictness,
    ) -> Result<Criteria, ValidationError> {
        let Self {
            location,
            price_range,
            min_price,
            max_price,
            utilities,
            nearby_services,
            sort,
        } = self;

        let mut criteria = Params {
            location,
            price: price_range,
            min_price,
            max_price,
            ..Params::default()
        }
        .parse(strictness)?;
        criteria.utilities = utilities
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect();
        criteria.nearby_services = nearby_services
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect();
        if let Some(sort) = sort {
            criteria.sort_key = sort.into();
        }
        Ok(criteria)
    }
}

/// Order of `Property` listings.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum SortKey {
    /// Most recently listed first.
    Newest,

    /// Cheapest first.
    PriceLow,

    /// Most expensive first.
    PriceHigh,
}

impl From<SortKey> for read::SortKey {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Newest => Self::Newest,
            SortKey::PriceLow => Self::PriceLow,
            SortKey::PriceHigh => Self::PriceHigh,
        }
    }
}

impl From<read::SortKey> for SortKey {
    fn from(key: read::SortKey) -> Self {
        match key {
            read::SortKey::Newest => Self::Newest,
            read::SortKey::PriceLow => Self::PriceLow,
            read::SortKey::PriceHigh => Self::PriceHigh,
        }
    }
}

/// Criterion currently constraining browse results.
#[derive(Clone, Debug, From, Into)]
pub struct ActiveFilter(read::ActiveFilter);

/// Criterion currently constraining browse results, shown as a removable
/// badge.
#[graphql_object(context = Context)]
impl ActiveFilter {
    /// Name of the criterion, like `location` or `services`.
    #[must_use]
    pub fn field(&self) -> &str {
        self.0.field()
    }

    /// Value of the criterion, like `school`.
    #[must_use]
    pub fn value(&self) -> String {
        self.0.value()
    }

    /// Human-readable badge text.
    #[must_use]
    pub fn label(&self) -> String {
        self.0.label()
    }
}

/// Price bucket offered for browsing.
#[derive(Clone, Copy, Debug, From, Into)]
pub struct PriceRangeOption(PriceRange);

/// Price bucket offered for browsing.
#[graphql_object(context = Context)]
impl PriceRangeOption {
    /// Value to pass as `BrowseCriteria.priceRange`.
    #[must_use]
    pub fn value(&self) -> String {
        self.0.to_string()
    }

    /// Human-readable bucket text, like `TZS 500,000 - 1,000,000`.
    #[must_use]
    pub fn label(&self) -> String {
        self.0.to_human()
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use service::read::property::{self as read, Strictness, ValidationError};

    use super::{CriteriaInput, SortKey};
    use crate::api::property::{NearbyService, Utility};

    #[test]
    fn omitted_input_is_identity() {
        let criteria = CriteriaInput::default()
            .parse(Strictness::Lenient)
            .unwrap();

        assert!(criteria.is_identity());
    }

    #[test]
    fn converts_typed_fields() {
        let criteria = CriteriaInput {
            location: Some("dar".into()),
            max_price: Some("500,000".into()),
            utilities: Some(vec![Utility::Water]),
            nearby_services: Some(vec![
                NearbyService::School,
                NearbyService::Market,
            ]),
            sort: Some(SortKey::PriceLow),
            ..CriteriaInput::default()
        }
        .parse(Strictness::Lenient)
        .unwrap();

        assert_eq!(criteria.location(), Some("dar"));
        assert_eq!(criteria.price_max, Some(Decimal::from(500_000)));
        assert_eq!(criteria.utilities.len(), 1);
        assert_eq!(criteria.nearby_services.len(), 2);
        assert_eq!(criteria.sort_key, read::SortKey::PriceLow);
    }

    #[test]
    fn strictness_decides_on_malformed_prices() {
        let input = CriteriaInput {
            price_range: Some("cheap".into()),
            ..CriteriaInput::default()
        };

        let lenient = input.clone().parse(Strictness::Lenient).unwrap();
        assert!(lenient.price_range.is_none());

        let err = input.parse(Strictness::Strict).unwrap_err();
        assert!(matches!(err, ValidationError::PriceRange { .. }));
    }
}
