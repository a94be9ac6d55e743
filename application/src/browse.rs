//! REST endpoint browsing the listed properties by URL query parameters.

use std::collections::BTreeMap;

use axum::{extract::Query, Extension, Json};
use serde::Serialize;
use service::{
    domain::{self, property::Utility, Favorites},
    query,
    read::property::{ActiveFilter, Criteria, Params, PriceRange, Strictness},
    Query as _,
};

use crate::{AsError, Error, Service};

/// Browses the active properties matching the URL query parameters.
///
/// Accepts `location`, `price`, `minPrice`, `maxPrice`, `utilities`,
/// `services` and `sort` parameters, along with comma-separated `favorites`
/// IDs of the viewer.
///
/// # Errors
///
/// If the parameters are malformed in strict mode, or the property store is
/// unavailable.
#[tracing::instrument(
    skip_all,
    fields(
        http.query = ?pairs,
        otel.name = "REST browse",
    ),
)]
pub async fn browse(
    Extension(service): Extension<Service>,
    strictness: Option<Extension<Strictness>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<View>, Error> {
    let strictness = strictness.map(|Extension(s)| s).unwrap_or_default();
    let criteria = Params::from_pairs(pairs.iter().map(|(k, v)| (k, v)))
        .parse(strictness)
        .map_err(AsError::into_error)?;
    let favorites = favorites(&pairs);

    let matched = service
        .execute(query::Browse {
            criteria: criteria.clone(),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(View::new(matched, &criteria, &favorites)))
}

/// Collects [`Favorites`] out of the `favorites` query parameters, skipping
/// malformed IDs.
fn favorites(pairs: &[(String, String)]) -> Favorites {
    pairs
        .iter()
        .filter(|(k, _)| k == "favorites")
        .flat_map(|(_, v)| v.split(','))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .filter_map(|id| {
            id.parse::<domain::property::Id>()
                .map_err(|e| {
                    tracing::debug!("ignoring malformed favorite `{id}`: {e}");
                })
                .ok()
        })
        .collect()
}

/// JSON body of the [`browse()`] response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// Matched properties, in the requested order.
    pub properties: Vec<PropertyView>,

    /// Number of matched properties.
    pub total: usize,

    /// Criteria currently constraining the properties.
    pub active_filters: Vec<FilterView>,

    /// Price buckets offered for browsing.
    pub price_ranges: Vec<PriceRangeView>,

    /// Order of the properties.
    pub sort: &'static str,
}

impl View {
    /// Renders the matched [`domain::Property`]s browsed by [`Criteria`].
    #[must_use]
    pub fn new(
        matched: Vec<domain::Property>,
        criteria: &Criteria,
        favorites: &Favorites,
    ) -> Self {
        Self {
            total: matched.len(),
            properties: matched
                .into_iter()
                .map(|p| PropertyView::new(p, favorites))
                .collect(),
            active_filters: criteria
                .active_filters()
                .iter()
                .map(|f| FilterView::new(f, criteria))
                .collect(),
            price_ranges: PriceRange::presets()
                .iter()
                .map(|r| PriceRangeView {
                    value: r.to_string(),
                    label: r.to_human(),
                    selected: criteria.price_range.as_ref() == Some(r),
                })
                .collect(),
            sort: criteria.sort_key.as_str(),
        }
    }
}

/// JSON representation of a [`domain::Property`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyView {
    id: String,
    landlord_id: String,
    title: String,
    description: String,
    price: PriceView,
    location: String,
    full_address: Option<String>,
    images: Vec<String>,
    utilities: Vec<&'static str>,
    nearby_services: Vec<&'static str>,
    status: &'static str,
    views: u32,
    inquiries: u32,
    created_at: Option<String>,
    landlord_contact: Option<ContactView>,
    is_favorited: bool,
}

impl PropertyView {
    /// Renders the provided [`domain::Property`].
    fn new(p: domain::Property, favorites: &Favorites) -> Self {
        Self {
            is_favorited: favorites.is_favorited(p.id),
            id: p.id.to_string(),
            landlord_id: p.landlord_id.to_string(),
            title: p.title.to_string(),
            description: p.description.to_string(),
            price: PriceView {
                amount: p.price.amount().normalize().to_string(),
                currency: p.price.currency().code(),
                label: p.price.to_human(),
            },
            location: p.location.to_string(),
            full_address: p.full_address.as_ref().map(ToString::to_string),
            images: p.images.iter().map(ToString::to_string).collect(),
            utilities: Utility::ALL
                .iter()
                .copied()
                .filter(|u| p.utilities.has(*u))
                .map(Utility::as_str)
                .collect(),
            nearby_services: p
                .nearby_services
                .iter()
                .copied()
                .map(domain::property::NearbyService::as_str)
                .collect(),
            status: p.status.as_str(),
            views: p.views,
            inquiries: p.inquiries,
            created_at: p.created_at.map(|at| at.to_rfc3339()),
            landlord_contact: p.landlord_contact.map(|c| ContactView {
                name: c.name.to_string(),
                phone: c.phone.as_ref().map(ToString::to_string),
                email: c.email.as_ref().map(ToString::to_string),
            }),
        }
    }
}

/// JSON representation of a [`domain::Property`] price.
#[derive(Debug, Serialize)]
struct PriceView {
    amount: String,
    currency: &'static str,
    label: String,
}

/// JSON representation of a landlord contact.
#[derive(Debug, Serialize)]
struct ContactView {
    name: String,
    phone: Option<String>,
    email: Option<String>,
}

/// JSON representation of an [`ActiveFilter`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterView {
    field: &'static str,
    value: String,
    label: String,

    /// Query parameters browsing with this filter removed.
    clear_params: BTreeMap<&'static str, String>,
}

impl FilterView {
    /// Renders the provided [`ActiveFilter`] of the [`Criteria`].
    fn new(filter: &ActiveFilter, criteria: &Criteria) -> Self {
        let mut cleared = criteria.clone();
        cleared.clear(filter);
        Self {
            field: filter.field(),
            value: filter.value(),
            label: filter.label(),
            clear_params: cleared.to_params().to_pairs().into_iter().collect(),
        }
    }
}

/// JSON representation of a [`PriceRange`] bucket.
#[derive(Debug, Serialize)]
pub struct PriceRangeView {
    value: String,
    label: String,
    selected: bool,
}

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};
    use rust_decimal::Decimal;
    use serde_json::json;
    use service::{
        domain::{
            landlord,
            property::{
                self, Description, Location, NearbyService, Status, Title,
                Utilities,
            },
            Favorites, Property,
        },
        read::property::{Params, Strictness},
    };

    use super::{favorites, View};

    fn listing(price: i64) -> Property {
        Property {
            id: property::Id::new(),
            landlord_id: landlord::Id::new(),
            title: Title::new("Nyumba Mikocheni").unwrap(),
            description: Description::default(),
            price: Money::tzs(Decimal::from(price)).unwrap(),
            location: Location::new("Mikocheni, Dar es Salaam").unwrap(),
            full_address: None,
            images: vec![],
            utilities: Utilities {
                electricity: true,
                water: false,
            },
            nearby_services: [NearbyService::Market, NearbyService::School]
                .into_iter()
                .collect(),
            status: Status::Active,
            views: 3,
            inquiries: 1,
            created_at: DateTime::from_rfc3339("2024-05-01T12:00:00Z")
                .ok()
                .map(DateTime::coerce),
            landlord_contact: None,
        }
    }

    #[test]
    fn renders_camel_case_json() {
        let p = listing(400_000);
        let favorites: Favorites = [p.id].into_iter().collect();
        let criteria = Params::from_pairs([
            ("location", "dar"),
            ("price", "0-500000"),
            ("sort", "price-low"),
        ])
        .parse(Strictness::Lenient)
        .unwrap();

        let json = serde_json::to_value(View::new(
            vec![p.clone()],
            &criteria,
            &favorites,
        ))
        .unwrap();

        assert_eq!(json["total"], 1);
        assert_eq!(json["sort"], "price-low");
        assert_eq!(
            json["properties"][0],
            json!({
                "id": p.id.to_string(),
                "landlordId": p.landlord_id.to_string(),
                "title": "Nyumba Mikocheni",
                "description": "",
                "price": {
                    "amount": "400000",
                    "currency": "TZS",
                    "label": "TZS 400,000",
                },
                "location": "Mikocheni, Dar es Salaam",
                "fullAddress": null,
                "images": [],
                "utilities": ["electricity"],
                "nearbyServices": ["school", "market"],
                "status": "active",
                "views": 3,
                "inquiries": 1,
                "createdAt": "2024-05-01T12:00:00Z",
                "landlordContact": null,
                "isFavorited": true,
            }),
        );
        assert_eq!(
            json["activeFilters"],
            json!([
                {
                    "field": "location",
                    "value": "dar",
                    "label": "Mahali: dar",
                    "clearParams": {"price": "0-500000", "sort": "price-low"},
                },
                {
                    "field": "price",
                    "value": "0-500000",
                    "label": "Bei: TZS 0 - 500,000",
                    "clearParams": {"location": "dar", "sort": "price-low"},
                },
            ]),
        );
        assert_eq!(json["priceRanges"].as_array().unwrap().len(), 5);
        assert_eq!(json["priceRanges"][0]["selected"], true);
        assert_eq!(json["priceRanges"][1]["selected"], false);
    }

    #[test]
    fn collects_favorites_skipping_malformed() {
        let (a, b) = (property::Id::new(), property::Id::new());

        let favorites = favorites(&[
            ("favorites".into(), format!("{a}, nope,")),
            ("location".into(), b.to_string()),
            ("favorites".into(), b.to_string()),
        ]);

        assert_eq!(favorites.len(), 2);
        assert!(favorites.is_favorited(a));
        assert!(favorites.is_favorited(b));
    }
}
