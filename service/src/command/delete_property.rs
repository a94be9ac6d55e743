//! [`Command`] for deleting a [`Property`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{landlord, property, Property},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for removing a [`Property`] listing completely.
#[derive(Clone, Copy, Debug)]
pub struct DeleteProperty {
    /// ID of the [`Property`] to delete.
    pub property_id: property::Id,

    /// ID of the landlord performing the deletion.
    pub landlord_id: landlord::Id,
}

impl<Db> Command<DeleteProperty> for Service<Db>
where
    Db: Database<
            Select<By<Option<Property>, property::Id>>,
            Ok = Option<Property>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Property, property::Id>>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteProperty) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteProperty {
            property_id,
            landlord_id,
        } = cmd;

        let property = self
            .database()
            .execute(Select(By::<Option<Property>, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|p| p.landlord_id == landlord_id)
            .ok_or(E::PropertyNotExists(property_id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Delete(By::<Property, _>::new(property_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tracing::info!(%property_id, %landlord_id, "property deleted");

        Ok(property)
    }
}

/// Error of [`DeleteProperty`] [`Command`] execution.
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
