//! [`Command`] for updating an existing [`Property`].

use common::{
    operations::{By, Select, Update},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{landlord, property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating the listing details of a [`Property`].
///
/// Only the provided fields are changed. Status, counters and the creation
/// time are left intact.
#[derive(Clone, Debug, Default)]
pub struct UpdateProperty {
    /// ID of the [`Property`] to update.
    pub property_id: property::Id,

    /// ID of the landlord performing the update.
    pub landlord_id: landlord::Id,

    /// New [`property::Title`].
    pub title: Option<property::Title>,

    /// New [`property::Description`].
    pub description: Option<property::Description>,

    /// New monthly rent.
    pub price: Option<Money>,

    /// New [`property::Location`].
    pub location: Option<property::Location>,

    /// New full [`property::Address`], [`Some`]`(`[`None`]`)` clearing it.
    pub full_address: Option<Option<property::Address>>,

    /// New [`property::ImageUrl`]s.
    pub images: Option<Vec<property::ImageUrl>>,

    /// New [`property::Utilities`].
    pub utilities: Option<property::Utilities>,

    /// New [`property::NearbyServices`].
    pub nearby_services: Option<property::NearbyServices>,

    /// New published contact, [`Some`]`(`[`None`]`)` hiding it.
    pub landlord_contact: Option<Option<landlord::Contact>>,
}

impl<Db> Command<UpdateProperty> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Update<Property>,
            Ok = bool,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateProperty) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProperty {
            property_id,
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

        let mut property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|p| p.landlord_id == landlord_id)
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        if let Some(title) = title {
            property.title = title;
        }
        if let Some(description) = description {
            property.description = description;
        }
        if let Some(price) = price {
            property.price = price;
        }
        if let Some(location) = location {
            property.location = location;
        }
        if let Some(full_address) = full_address {
            property.full_address = full_address;
        }
        if let Some(images) = images {
            property.images = images;
        }
        if let Some(utilities) = utilities {
            property.utilities = utilities;
        }
        if let Some(nearby_services) = nearby_services {
            property.nearby_services = nearby_services;
        }
        if let Some(landlord_contact) = landlord_contact {
            property.landlord_contact = landlord_contact;
        }

        let updated = self
            .database()
            .execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !updated {
            return Err(tracerr::new!(E::PropertyNotExists(property_id)));
        }

        Ok(property)
    }
}

/// Error of [`UpdateProperty`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Property`] with the provided ID does not exist, or belongs to
    /// another landlord.
    #[display("`Property(id: {_0})` does not exist")]
    PropertyNotExists(#[error(not(source))] property::Id),
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use crate::{
        command::{tests::listing, CreateProperty},
        domain::{landlord, property},
        infra::database::memory::{Memory, Vanishing},
        read::property::tests::property as fixture,
        Service,
    };

    use super::{Command as _, ExecutionError, UpdateProperty};

    #[tokio::test]
    async fn changes_only_provided_fields() {
        let service = Service::new(Memory::default());
        let landlord_id = landlord::Id::new();
        let created = service
            .execute(CreateProperty {
                full_address: property::Address::new("Plot 12, Mbezi"),
                ..listing(landlord_id)
            })
            .await
            .unwrap();

        let updated = service
            .execute(UpdateProperty {
                property_id: created.id,
                landlord_id,
                price: Money::tzs(Decimal::from(650_000)),
                full_address: Some(None),
                ..UpdateProperty::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.price.amount(), Decimal::from(650_000));
        assert_eq!(updated.full_address, None);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(service.database().all()[0].price, updated.price);
    }

    #[tokio::test]
    async fn refuses_foreign_property() {
        let service = Service::new(Memory::default());
        let created = service
            .execute(listing(landlord::Id::new()))
            .await
            .unwrap();

        let err = service
            .execute(UpdateProperty {
                property_id: created.id,
                landlord_id: landlord::Id::new(),
                title: property::Title::new("Imeibiwa"),
                ..UpdateProperty::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PropertyNotExists(id) if *id == created.id,
        ));
        assert_eq!(service.database().all()[0].title, created.title);
    }

    #[tokio::test]
    async fn does_not_resurrect_concurrently_deleted_property() {
        let landlord_id = landlord::Id::new();
        let stored = fixture("a").landlord(landlord_id).build();
        let memory = Memory::with([stored.clone()]);
        let service = Service::new(Vanishing(memory.clone()));

        let err = service
            .execute(UpdateProperty {
                property_id: stored.id,
                landlord_id,
                price: Money::tzs(Decimal::from(650_000)),
                ..UpdateProperty::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PropertyNotExists(id) if *id == stored.id,
        ));
        assert!(memory.all().is_empty());
    }
}
