//! [`Command`] for creating a new [`Property`].

use common::{operations::Insert, DateTime, Money};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::property::{
    Address, Description, ImageUrl, Location, NearbyServices, Status, Title,
    Utilities,
};
use crate::{
    domain::{landlord, property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Property`] listing.
///
/// The created [`Property`] is [`Status::Active`] right away, with zero
/// views and inquiries.
#[derive(Clone, Debug)]
pub struct CreateProperty {
    /// ID of the landlord listing the new [`Property`].
    pub landlord_id: landlord::Id,

    /// [`Title`] of the new [`Property`].
    pub title: property::Title,

    /// [`Description`] of the new [`Property`].
    pub description: property::Description,

    /// Monthly rent of the new [`Property`].
    pub price: Money,

    /// [`Location`] of the new [`Property`].
    pub location: property::Location,

    /// Full [`Address`] of the new [`Property`].
    pub full_address: Option<property::Address>,

    /// [`ImageUrl`]s of the new [`Property`].
    pub images: Vec<property::ImageUrl>,

    /// [`Utilities`] of the new [`Property`].
    pub utilities: property::Utilities,

    /// [`NearbyServices`] of the new [`Property`].
    pub nearby_services: property::NearbyServices,

    /// Published contact of the landlord.
    pub landlord_contact: Option<landlord::Contact>,
}

impl<Db> Command<CreateProperty> for Service<Db>
where
    Db: Database<Insert<Property>, Err = Traced<database::Error>>,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateProperty) -> Result<Self::Ok, Self::Err> {
        let CreateProperty {
            landlord_id,
            title,
            description,
            price,
            location,
            full_address,
            images,
            utilities,
            nearby_services,
            landlord_contact,
        } = cmd;

        let property = Property {
            id: property::Id::new(),
            landlord_id,
            title,
            description,
            price,
            location,
            full_address,
            images,
            utilities,
            nearby_services,
            status: property::Status::Active,
            views: 0,
            inquiries: 0,
            created_at: Some(DateTime::now().coerce()),
            landlord_contact,
        };

        self.database()
            .execute(Insert(property.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        tracing::info!(
            property_id = %property.id,
            landlord_id = %property.landlord_id,
            "property listed",
        );

        Ok(property)
    }
}

/// Error of [`CreateProperty`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use crate::{
        command::tests::listing, domain::landlord,
        infra::database::memory::Memory, query, Service,
    };

    use super::Command as _;

    #[tokio::test]
    async fn lists_active_property_with_zero_counters() {
        let service = Service::new(Memory::default());
        let landlord_id = landlord::Id::new();

        let created = service.execute(listing(landlord_id)).await.unwrap();

        assert!(created.is_active());
        assert_eq!(created.landlord_id, landlord_id);
        assert_eq!((created.views, created.inquiries), (0, 0));
        assert!(created.created_at.is_some());

        let stored = service
            .execute(query::property::ById::by(created.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title, created.title);
    }
}
