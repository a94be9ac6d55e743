//! [`Criteria`] definitions.

use std::{collections::BTreeSet, str::FromStr as _};

use derive_more::{Display, Error};
use rust_decimal::Decimal;
use smart_default::SmartDefault;

use crate::domain::{
    property::{NearbyService, NearbyServices, Utility},
    Property,
};

use super::{PriceRange, SortKey};

/// Browse filter criteria, evaluated against every [`Property`].
///
/// [`Criteria::default()`] is the identity filter: it matches every
/// [`Property`] and sorts the newest first.
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct Criteria {
    /// Case-insensitive substring to look for in [`Property::location`].
    ///
    /// Surrounding whitespace is ignored, an empty query matches anything.
    pub location_query: String,

    /// Minimal allowed monthly rent, inclusive.
    pub price_min: Option<Decimal>,

    /// Maximal allowed monthly rent, inclusive.
    pub price_max: Option<Decimal>,

    /// Predefined [`PriceRange`] bucket.
    ///
    /// Applies in addition to [`Criteria::price_min`] and
    /// [`Criteria::price_max`] when both are present.
    pub price_range: Option<PriceRange>,

    /// [`Utility`]s a [`Property`] must have, all of them.
    pub utilities: BTreeSet<Utility>,

    /// [`NearbyService`]s a [`Property`] must be close to, all of them.
    pub nearby_services: NearbyServices,

    /// Order of the matched [`Property`]s.
    #[default(SortKey::Newest)]
    pub sort_key: SortKey,
}

impl Criteria {
    /// Indicates whether the provided [`Property`] satisfies this
    /// [`Criteria`].
    ///
    /// [`Property::status`] is not checked here: the property store only
    /// hands out active [`Property`]s for browsing, while the landlord
    /// dashboard deliberately filters over inactive ones too.
    #[must_use]
    pub fn matches(&self, property: &Property) -> bool {
        self.matches_location(property)
            && self.matches_price(property)
            && self.matches_utilities(property)
            && property.nearby_services.contains_all(&self.nearby_services)
    }

    /// Filters the provided [`Property`]s with this [`Criteria`] and sorts
    /// the matched ones by its [`SortKey`].
    #[must_use]
    pub fn apply<P, I>(&self, properties: I) -> Vec<P>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Property>,
    {
        let mut matched = properties
            .into_iter()
            .filter(|p| self.matches(p.as_ref()))
            .collect::<Vec<_>>();
        self.sort_key.sort(&mut matched);
        matched
    }

    /// Returns the trimmed location query, if not empty.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        Some(self.location_query.trim()).filter(|q| !q.is_empty())
    }

    /// Indicates whether this [`Criteria`] doesn't filter anything out.
    ///
    /// [`Criteria::sort_key`] is not considered.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.location().is_none()
            && self.price_min.is_none()
            && self.price_max.is_none()
            && self.price_range.is_none()
            && self.utilities.is_empty()
            && self.nearby_services.is_empty()
    }

    /// Renders this [`Criteria`] back into normalized [`Params`].
    ///
    /// Parsing the result yields an equivalent [`Criteria`], so it's suitable
    /// for building browse links. Default [`SortKey`] is omitted.
    #[must_use]
    pub fn to_params(&self) -> Params {
        let amount = |a: Decimal| a.normalize().to_string();
        Params {
            location: self.location().map(ToOwned::to_owned),
            price: self.price_range.as_ref().map(ToString::to_string),
            min_price: self.price_min.map(amount),
            max_price: self.price_max.map(amount),
            utilities: self
                .utilities
                .iter()
                .map(ToString::to_string)
                .collect(),
            services: self
                .nearby_services
                .iter()
                .map(ToString::to_string)
                .collect(),
            sort: (self.sort_key != SortKey::default())
                .then(|| self.sort_key.to_string()),
        }
    }

    /// Checks [`Criteria::location_query`].
    fn matches_location(&self, property: &Property) -> bool {
        self.location().map_or(true, |query| {
            AsRef::<str>::as_ref(&property.location)
                .to_lowercase()
                .contains(&query.to_lowercase())
        })
    }

    /// Checks custom price bounds and the [`PriceRange`] bucket.
    fn matches_price(&self, property: &Property) -> bool {
        let price = property.price.amount();
        self.price_min.map_or(true, |min| price >= min)
            && self.price_max.map_or(true, |max| price <= max)
            && self.price_range.map_or(true, |range| range.contains(price))
    }

    /// Checks required [`Utility`]s.
    fn matches_utilities(&self, property: &Property) -> bool {
        self.utilities.iter().all(|u| property.utilities.has(*u))
    }
}

/// Raw browse parameters, as they come in a URL query string.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Params {
    /// `location` parameter.
    pub location: Option<String>,

    /// `price` parameter, holding a [`PriceRange`] bucket.
    pub price: Option<String>,

    /// `minPrice` parameter.
    pub min_price: Option<String>,

    /// `maxPrice` parameter.
    pub max_price: Option<String>,

    /// `utilities` parameter values.
    pub utilities: Vec<String>,

    /// `services` parameter values.
    pub services: Vec<String>,

    /// `sort` parameter.
    pub sort: Option<String>,
}

impl Params {
    /// Collects [`Params`] out of URL query `pairs`.
    ///
    /// List parameters (`utilities`, `services`) may be either repeated or
    /// comma-separated. Unknown keys are skipped, and the last occurrence of
    /// a scalar parameter wins.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "location" => params.location = Some(value.to_owned()),
                "price" | "priceRange" => params.price = Some(value.to_owned()),
                "minPrice" => params.min_price = Some(value.to_owned()),
                "maxPrice" => params.max_price = Some(value.to_owned()),
                "utilities" | "utility" => {
                    params.utilities.extend(split_list(value));
                }
                "services" | "nearbyServices" => {
                    params.services.extend(split_list(value));
                }
                "sort" | "sortBy" => params.sort = Some(value.to_owned()),
                _ => {}
            }
        }
        params
    }

    /// Lists the present [`Params`] as URL query pairs, joining list
    /// parameters with commas.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let scalars = [
            ("location", &self.location),
            ("price", &self.price),
            ("minPrice", &self.min_price),
            ("maxPrice", &self.max_price),
        ];
        let lists = [
            ("utilities", &self.utilities),
            ("services", &self.services),
        ];

        let mut pairs = scalars
            .into_iter()
            .filter_map(|(k, v)| Some((k, v.clone()?)))
            .collect::<Vec<_>>();
        pairs.extend(
            lists
                .into_iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, v)| (k, v.join(","))),
        );
        pairs.extend(self.sort.clone().map(|v| ("sort", v)));
        pairs
    }

    /// Parses these [`Params`] into [`Criteria`].
    ///
    /// # Errors
    ///
    /// With [`Strictness::Strict`] only, if any of the parameters is
    /// malformed. [`Strictness::Lenient`] treats malformed parameters as
    /// absent instead.
    pub fn parse(
        &self,
        strictness: Strictness,
    ) -> Result<Criteria, ValidationError> {
        use ValidationError as E;

        let price_min =
            strictness.tolerate(bound("minPrice", self.min_price.as_deref()))?;
        let price_max =
            strictness.tolerate(bound("maxPrice", self.max_price.as_deref()))?;
        let price_range = strictness.tolerate(bucket(self.price.as_deref()))?;

        let mut utilities = BTreeSet::new();
        for value in &self.utilities {
            let parsed = value
                .parse::<Utility>()
                .map(Some)
                .map_err(|_| E::UnknownUtility { value: value.clone() });
            if let Some(u) = strictness.tolerate(parsed)? {
                _ = utilities.insert(u);
            }
        }

        let mut nearby_services = BTreeSet::new();
        for value in &self.services {
            let parsed = value
                .parse::<NearbyService>()
                .map(Some)
                .map_err(|_| E::UnknownService { value: value.clone() });
            if let Some(s) = strictness.tolerate(parsed)? {
                _ = nearby_services.insert(s);
            }
        }

        let sort_key = match self.sort.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => strictness.tolerate(
                s.parse::<SortKey>()
                    .map(Some)
                    .map_err(|_| E::UnknownSortKey { value: s.to_owned() }),
            )?,
        };

        Ok(Criteria {
            location_query: self.location.clone().unwrap_or_default(),
            price_min,
            price_max,
            price_range,
            utilities,
            nearby_services: nearby_services.into_iter().collect(),
            sort_key: sort_key.unwrap_or_default(),
        })
    }
}

/// Strictness of parsing [`Params`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Strictness {
    /// Malformed parameters are ignored.
    #[default]
    Lenient,

    /// Malformed parameters are rejected with a [`ValidationError`].
    Strict,
}

impl Strictness {
    /// Resolves the result of parsing a single parameter: in
    /// [`Strictness::Lenient`] mode a malformed parameter counts as absent.
    fn tolerate<T>(
        self,
        parsed: Result<Option<T>, ValidationError>,
    ) -> Result<Option<T>, ValidationError> {
        match parsed {
            Err(e) if self == Self::Lenient => {
                tracing::debug!("ignoring malformed browse parameter: {e}");
                Ok(None)
            }
            res => res,
        }
    }
}

/// Error of parsing [`Params`] in [`Strictness::Strict`] mode.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
pub enum ValidationError {
    /// Price bound is not a number.
    #[display("`{param}` is not a number: `{value}`")]
    NotANumber {
        /// Name of the malformed parameter.
        param: &'static str,

        /// Malformed value.
        value: String,
    },

    /// [`PriceRange`] bucket is malformed.
    #[display("`{value}` is not a `<min>-<max>` or `<min>+` price range")]
    PriceRange {
        /// Malformed value.
        value: String,
    },

    /// [`Utility`] is not from the known vocabulary.
    #[display("unknown utility: `{value}`")]
    UnknownUtility {
        /// Unknown value.
        value: String,
    },

    /// [`NearbyService`] is not from the known vocabulary.
    #[display("unknown nearby service: `{value}`")]
    UnknownService {
        /// Unknown value.
        value: String,
    },

    /// [`SortKey`] is not from the known vocabulary.
    #[display("unknown sort key: `{value}`")]
    UnknownSortKey {
        /// Unknown value.
        value: String,
    },
}

/// Parses a money amount typed by a user, like `500000` or `500,000`.
///
/// [`None`] is returned for blank or non-numeric input.
pub(super) fn parse_amount(input: &str) -> Option<Decimal> {
    let input = input.trim().replace(',', "");
    if input.is_empty() {
        return None;
    }
    Decimal::from_str(&input).ok()
}

/// Parses an optional custom price bound `param`.
fn bound(
    param: &'static str,
    value: Option<&str>,
) -> Result<Option<Decimal>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_amount(v).map(Some).ok_or_else(|| {
            ValidationError::NotANumber {
                param,
                value: v.to_owned(),
            }
        }),
    }
}

/// Parses an optional [`PriceRange`] bucket, where `all` means no bucket.
fn bucket(value: Option<&str>) -> Result<Option<PriceRange>, ValidationError> {
    match value.map(str::trim) {
        None | Some("" | "all") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| {
            ValidationError::PriceRange {
                value: v.to_owned(),
            }
        }),
    }
}

/// Splits a comma-separated list parameter, skipping blank items.
fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}
