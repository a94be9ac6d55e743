//! [`Command`] for changing visibility of a [`Property`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{landlord, property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for showing or hiding a [`Property`] in browse results.
#[derive(Clone, Copy, Debug)]
pub struct SetPropertyStatus {
    /// ID of the [`Property`] to change.
    pub property_id: property::Id,

    /// ID of the landlord performing the change.
    pub landlord_id: landlord::Id,

    /// New [`property::Status`].
    pub status: property::Status,
}

impl<Db> Command<SetPropertyStatus> for Service<Db>
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

    async fn execute(
        &self,
        cmd: SetPropertyStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SetPropertyStatus {
            property_id,
            landlord_id,
            status,
        } = cmd;

        let mut property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|p| p.landlord_id == landlord_id)
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        if property.status == status {
            return Ok(property);
        }
        property.status = status;

        let updated = self
            .database()
            .execute(Update(property.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !updated {
            return Err(tracerr::new!(E::PropertyNotExists(property_id)));
        }

        tracing::info!(%property_id, %status, "property status changed");

        Ok(property)
    }
}

/// Error of [`SetPropertyStatus`] [`Command`] execution.
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
    use crate::{
        command::tests::listing,
        domain::{landlord, property::Status},
        infra::database::memory::{Memory, Vanishing},
        query, read,
        read::property::tests::property,
        Service,
    };

    use super::{Command as _, ExecutionError, SetPropertyStatus};

    #[tokio::test]
    async fn hides_property_from_browsing() {
        let service = Service::new(Memory::default());
        let landlord_id = landlord::Id::new();
        let created = service.execute(listing(landlord_id)).await.unwrap();

        let hidden = service
            .execute(SetPropertyStatus {
                property_id: created.id,
                landlord_id,
                status: Status::Inactive,
            })
            .await
            .unwrap();
        assert!(!hidden.is_active());

        let active = service
            .execute(query::properties::ListActive::by(read::property::Active))
            .await
            .unwrap();
        assert!(active.is_empty());

        let own = service
            .execute(query::properties::OfLandlord::by(landlord_id))
            .await
            .unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].status, Status::Inactive);
    }

    #[tokio::test]
    async fn fails_on_concurrently_deleted_property() {
        let landlord_id = landlord::Id::new();
        let stored = property("a").landlord(landlord_id).build();
        let memory = Memory::with([stored.clone()]);
        let service = Service::new(Vanishing(memory.clone()));

        let err = service
            .execute(SetPropertyStatus {
                property_id: stored.id,
                landlord_id,
                status: Status::Inactive,
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
