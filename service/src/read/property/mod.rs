//! [`Property`]-related read definitions.
//!
//! Everything here is a pure computation over already fetched [`Property`]s:
//! the same [`Criteria`] drive browse results, the landlord dashboard and
//! the `/browse` endpoint.

pub mod active_filter;
pub mod criteria;
pub mod price_range;
pub mod sort;
pub mod stats;

#[cfg(doc)]
use crate::domain::Property;

pub use self::{
    active_filter::ActiveFilter,
    criteria::{Criteria, Params, Strictness, ValidationError},
    price_range::PriceRange,
    sort::SortKey,
    stats::Stats,
};

/// Selector of all [`Property`]s visible in browse results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Active;

#[cfg(test)]
pub(crate) mod tests {
    //! [`Property`] fixtures.

    use common::{DateTime, Money};
    use rust_decimal::Decimal;

    use crate::domain::{
        landlord,
        property::{
            self, Description, Location, NearbyService, Status, Title,
            Utilities,
        },
        Property,
    };

    /// Builder of a [`Property`] tagged by its [`Title`].
    #[derive(Clone, Debug)]
    pub(crate) struct PropertyBuilder(Property);

    /// Starts building a [`Property`] with the provided `tag` as its
    /// [`Title`].
    pub(crate) fn property(tag: &str) -> PropertyBuilder {
        PropertyBuilder(Property {
            id: property::Id::new(),
            landlord_id: landlord::Id::default(),
            title: Title::new(tag).unwrap(),
            description: Description::default(),
            price: Money::tzs(Decimal::from(100_000)).unwrap(),
            location: Location::new("Sinza, Dar es Salaam").unwrap(),
            full_address: None,
            images: vec![],
            utilities: Utilities::default(),
            nearby_services: property::NearbyServices::default(),
            status: Status::Active,
            views: 0,
            inquiries: 0,
            created_at: None,
            landlord_contact: None,
        })
    }

    impl PropertyBuilder {
        pub(crate) fn price(mut self, amount: i64) -> Self {
            self.0.price = Money::tzs(Decimal::from(amount)).unwrap();
            self
        }

        pub(crate) fn created_at(mut self, unix: i64) -> Self {
            self.0.created_at =
                Some(DateTime::from_unix_timestamp(unix).unwrap().coerce());
            self
        }

        pub(crate) fn location(mut self, location: &str) -> Self {
            self.0.location = Location::new(location).unwrap();
            self
        }

        pub(crate) fn services(mut self, services: &[NearbyService]) -> Self {
            self.0.nearby_services = services.iter().copied().collect();
            self
        }

        pub(crate) fn utilities(mut self, electricity: bool, water: bool) -> Self {
            self.0.utilities = Utilities { electricity, water };
            self
        }

        pub(crate) fn status(mut self, status: Status) -> Self {
            self.0.status = status;
            self
        }

        pub(crate) fn landlord(mut self, id: landlord::Id) -> Self {
            self.0.landlord_id = id;
            self
        }

        pub(crate) fn counters(mut self, views: u32, inquiries: u32) -> Self {
            self.0.views = views;
            self.0.inquiries = inquiries;
            self
        }

        pub(crate) fn build(self) -> Property {
            self.0
        }
    }

    /// Two listings: a cheap one in Dar es Salaam near a school, and an
    /// expensive one in Arusha near a school and a market.
    pub(crate) fn sample() -> Vec<Property> {
        vec![
            property("1")
                .price(400_000)
                .location("Mikocheni, Dar es Salaam")
                .services(&[NearbyService::School])
                .created_at(1_700_000_000)
                .build(),
            property("2")
                .price(900_000)
                .location("Arusha")
                .services(&[NearbyService::School, NearbyService::Market])
                .created_at(1_710_000_000)
                .build(),
        ]
    }

    /// Returns [`Title`]s of the provided [`Property`]s in their order.
    pub(crate) fn tags<P: AsRef<Property>>(properties: &[P]) -> Vec<String> {
        properties
            .iter()
            .map(|p| p.as_ref().title.to_string())
            .collect()
    }
}
