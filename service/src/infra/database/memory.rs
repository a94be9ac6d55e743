//! In-memory [`Database`] used in tests.

use std::sync::{Arc, Mutex};

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{landlord, property, Property},
    infra::{database, Database},
    read,
};

/// In-memory [`Database`] keeping [`Property`]s in insertion order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Memory(Arc<Mutex<Vec<Property>>>);

impl Memory {
    /// Creates a new [`Memory`] storage pre-filled with `properties`.
    pub(crate) fn with(properties: impl IntoIterator<Item = Property>) -> Self {
        Self(Arc::new(Mutex::new(properties.into_iter().collect())))
    }

    /// Returns a snapshot of all the stored [`Property`]s.
    pub(crate) fn all(&self) -> Vec<Property> {
        self.0.lock().unwrap().clone()
    }
}

impl Database<Select<By<Vec<Property>, read::property::Active>>> for Memory {
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Property>, read::property::Active>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.all().into_iter().filter(Property::is_active).collect())
    }
}

impl Database<Select<By<Vec<Property>, landlord::Id>>> for Memory {
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, landlord::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let landlord_id = by.into_inner();
        Ok(self
            .all()
            .into_iter()
            .filter(|p| p.landlord_id == landlord_id)
            .collect())
    }
}

impl Database<Select<By<Option<Property>, property::Id>>> for Memory {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.all().into_iter().find(|p| p.id == id))
    }
}

impl Database<Insert<Property>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.lock().unwrap().push(property);
        Ok(())
    }
}

impl Database<Update<Property>> for Memory {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut stored = self.0.lock().unwrap();
        let Some(p) = stored.iter_mut().find(|p| {
            p.id == property.id && p.landlord_id == property.landlord_id
        }) else {
            return Ok(false);
        };
        *p = Property {
            views: p.views,
            inquiries: p.inquiries,
            created_at: p.created_at,
            ..property
        };
        Ok(true)
    }
}

impl Database<Delete<By<Property, property::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.0.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

/// [`Memory`] deleting every [`Property`] right after it's read by ID, as if
/// a concurrent deletion happened in between.
#[derive(Clone, Debug, Default)]
pub(crate) struct Vanishing(pub(crate) Memory);

impl Database<Select<By<Option<Property>, property::Id>>> for Vanishing {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        select: Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let found = self.0.execute(select).await?;
        if let Some(p) = &found {
            self.0.execute(Delete(By::<Property, _>::new(p.id))).await?;
        }
        Ok(found)
    }
}

impl Database<Update<Property>> for Vanishing {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        update: Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.0.execute(update).await
    }
}
