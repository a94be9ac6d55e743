//! [`Command`] definition.

pub mod create_property;
pub mod delete_property;
pub mod set_property_status;
pub mod update_property;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_property::CreateProperty, delete_property::DeleteProperty,
    set_property_status::SetPropertyStatus, update_property::UpdateProperty,
};

#[cfg(test)]
pub(crate) mod tests {
    //! [`Command`] fixtures.

    use common::Money;
    use rust_decimal::Decimal;

    use crate::domain::{landlord, property};

    use super::CreateProperty;

    /// Returns a [`CreateProperty`] [`Command`] of the provided landlord.
    pub(crate) fn listing(landlord_id: landlord::Id) -> CreateProperty {
        CreateProperty {
            landlord_id,
            title: property::Title::new("Nyumba ya Kisasa").unwrap(),
            description: property::Description::default(),
            price: Money::tzs(Decimal::from(750_000)).unwrap(),
            location: property::Location::new("Mbezi Beach, Dar es Salaam")
                .unwrap(),
            full_address: None,
            images: vec![],
            utilities: property::Utilities {
                electricity: true,
                water: true,
            },
            nearby_services: [property::NearbyService::School]
                .into_iter()
                .collect(),
            landlord_contact: None,
        }
    }
}
