//! [`ActiveFilter`] definitions.

use common::money::group_thousands;
use rust_decimal::Decimal;

use crate::domain::property::{NearbyService, Utility};

use super::{Criteria, PriceRange};

/// Single [`Criteria`] field currently constraining browse results.
///
/// Rendered as a removable badge above the results.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ActiveFilter {
    /// Non-blank [`Criteria::location_query`], trimmed.
    Location(String),

    /// [`Criteria::price_range`] bucket.
    PriceRange(PriceRange),

    /// [`Criteria::price_min`] bound.
    PriceMin(Decimal),

    /// [`Criteria::price_max`] bound.
    PriceMax(Decimal),

    /// One of [`Criteria::utilities`].
    Utility(Utility),

    /// One of [`Criteria::nearby_services`].
    NearbyService(NearbyService),
}

impl ActiveFilter {
    /// Returns the URL query parameter this [`ActiveFilter`] comes from.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Location(_) => "location",
            Self::PriceRange(_) => "price",
            Self::PriceMin(_) => "minPrice",
            Self::PriceMax(_) => "maxPrice",
            Self::Utility(_) => "utilities",
            Self::NearbyService(_) => "services",
        }
    }

    /// Returns the URL query value of this [`ActiveFilter`].
    #[must_use]
    pub fn value(&self) -> String {
        match self {
            Self::Location(q) => q.clone(),
            Self::PriceRange(r) => r.to_string(),
            Self::PriceMin(a) | Self::PriceMax(a) => a.normalize().to_string(),
            Self::Utility(u) => u.to_string(),
            Self::NearbyService(s) => s.to_string(),
        }
    }

    /// Returns the badge label of this [`ActiveFilter`] in Swahili.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Location(q) => format!("Mahali: {q}"),
            Self::PriceRange(r) => format!("Bei: {}", r.to_human()),
            Self::PriceMin(a) => {
                format!("Bei ya chini: TZS {}", group_thousands(*a))
            }
            Self::PriceMax(a) => {
                format!("Bei ya juu: TZS {}", group_thousands(*a))
            }
            Self::Utility(u) => match u {
                Utility::Electricity => "Umeme",
                Utility::Water => "Maji",
            }
            .into(),
            Self::NearbyService(s) => match s {
                NearbyService::School => "Shule",
                NearbyService::Hospital => "Hospitali",
                NearbyService::Market => "Soko",
                NearbyService::Bank => "Benki",
                NearbyService::Transport => "Usafiri",
            }
            .into(),
        }
    }
}

impl Criteria {
    /// Lists [`ActiveFilter`]s of this [`Criteria`].
    ///
    /// The order is fixed: location, price bucket, custom minimum, custom
    /// maximum, then every utility and every nearby service.
    #[must_use]
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut filters = Vec::new();
        if let Some(q) = self.location() {
            filters.push(ActiveFilter::Location(q.to_owned()));
        }
        if let Some(r) = self.price_range {
            filters.push(ActiveFilter::PriceRange(r));
        }
        if let Some(min) = self.price_min {
            filters.push(ActiveFilter::PriceMin(min));
        }
        if let Some(max) = self.price_max {
            filters.push(ActiveFilter::PriceMax(max));
        }
        filters.extend(self.utilities.iter().copied().map(ActiveFilter::Utility));
        filters.extend(
            self.nearby_services
                .iter()
                .copied()
                .map(ActiveFilter::NearbyService),
        );
        filters
    }

    /// Removes the provided [`ActiveFilter`] from this [`Criteria`], leaving
    /// the rest intact.
    ///
    /// Does nothing if the [`ActiveFilter`] is not active.
    pub fn clear(&mut self, filter: &ActiveFilter) {
        match filter {
            ActiveFilter::Location(_) => self.location_query.clear(),
            ActiveFilter::PriceRange(_) => self.price_range = None,
            ActiveFilter::PriceMin(_) => self.price_min = None,
            ActiveFilter::PriceMax(_) => self.price_max = None,
            ActiveFilter::Utility(u) => {
                _ = self.utilities.remove(u);
            }
            ActiveFilter::NearbyService(s) => {
                self.nearby_services = self
                    .nearby_services
                    .iter()
                    .copied()
                    .filter(|x| x != s)
                    .collect();
            }
        }
    }

    /// Resets this [`Criteria`] to the identity filter sorting the newest
    /// first.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }
}
