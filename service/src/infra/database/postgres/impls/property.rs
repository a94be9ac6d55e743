//! [`Property`]-related [`Database`] implementations.

use std::fmt;

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::{types::FromSql, Row};
use tracerr::Traced;

use crate::{
    domain::{
        landlord,
        property::{self, NearbyService, Utilities},
        Property,
    },
    infra::{
        database::{
            self,
            postgres::{self, Connection},
            Postgres,
        },
        Database,
    },
    read,
};

/// Columns of the `properties` table, in the order [`from_row`] reads them.
macro_rules! columns {
    () => {
        "id, landlord_id, title, description, price, \
         location, full_address, images, \
         has_electricity, has_water, nearby_services, \
         status, views, inquiries, created_at, \
         contact_name, contact_phone, contact_email"
    };
}

/// Reads a [`Property`] out of the provided `properties` table [`Row`].
///
/// # Errors
///
/// With [`postgres::Error::MalformedRow`] if any column doesn't convert into
/// its domain type.
fn from_row(row: &Row) -> Result<Property, Traced<database::Error>> {
    let counter = |column: &'static str| {
        let value = get::<i64>(row, column)?;
        property::Counter::try_from(value).map_err(|_| {
            malformed(column, format_args!("out of range: {value}"))
        })
    };

    let landlord_contact = get::<Option<landlord::Name>>(row, "contact_name")?
        .map(|name| {
            Ok::<_, Traced<database::Error>>(landlord::Contact {
                name,
                phone: get(row, "contact_phone")?,
                email: get(row, "contact_email")?,
            })
        })
        .transpose()?;

    Ok(Property {
        id: get(row, "id")?,
        landlord_id: get(row, "landlord_id")?,
        title: get(row, "title")?,
        description: get(row, "description")?,
        price: get(row, "price")?,
        location: get(row, "location")?,
        full_address: get(row, "full_address")?,
        images: get(row, "images")?,
        utilities: Utilities {
            electricity: get(row, "has_electricity")?,
            water: get(row, "has_water")?,
        },
        nearby_services: get::<Vec<NearbyService>>(row, "nearby_services")?
            .into_iter()
            .collect(),
        status: get(row, "status")?,
        views: counter("views")?,
        inquiries: counter("inquiries")?,
        created_at: get(row, "created_at")?,
        landlord_contact,
    })
}

/// Reads the `column` of the provided `properties` table [`Row`].
fn get<'r, T: FromSql<'r>>(
    row: &'r Row,
    column: &'static str,
) -> Result<T, Traced<database::Error>> {
    row.try_get(column).map_err(|e| malformed(column, e))
}

/// Creates a [`postgres::Error::MalformedRow`] of the `properties` table.
fn malformed(
    column: &'static str,
    reason: impl fmt::Display,
) -> Traced<database::Error> {
    tracerr::new!(database::Error::from(postgres::Error::MalformedRow {
        table: "properties",
        reason: format!("`{column}` {reason}"),
    }))
}

impl Database<Select<By<Vec<Property>, read::property::Active>>>
    for Postgres
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Property>, read::property::Active>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = concat!(
            "SELECT ",
            columns!(),
            " FROM properties \
              WHERE status = $1::INT2 \
              ORDER BY created_at DESC NULLS LAST, id",
        );
        self.rows(SQL, &[&property::Status::Active])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect()
    }
}

impl Database<Select<By<Vec<Property>, landlord::Id>>> for Postgres {
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, landlord::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let landlord_id: landlord::Id = by.into_inner();

        const SQL: &str = concat!(
            "SELECT ",
            columns!(),
            " FROM properties \
              WHERE landlord_id = $1::UUID \
              ORDER BY created_at DESC NULLS LAST, id",
        );
        self.rows(SQL, &[&landlord_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect()
    }
}

impl Database<Select<By<Option<Property>, property::Id>>> for Postgres {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: property::Id = by.into_inner();

        const SQL: &str = concat!(
            "SELECT ",
            columns!(),
            " FROM properties \
              WHERE id = $1::UUID",
        );
        self.row(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row)
            .transpose()
    }
}

impl Database<Insert<Property>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let Property {
            id,
            landlord_id,
            title,
            description,
            price,
            location,
            full_address,
            images,
            utilities,
            nearby_services,
            status,
            views,
            inquiries,
            created_at,
            landlord_contact,
        } = property;

        let nearby_services =
            nearby_services.iter().copied().collect::<Vec<_>>();
        let (views, inquiries) = (i64::from(views), i64::from(inquiries));
        let (contact_name, contact_phone, contact_email) = landlord_contact
            .map_or((None, None, None), |c| (Some(c.name), c.phone, c.email));

        const SQL: &str = concat!(
            "INSERT INTO properties (",
            columns!(),
            ") VALUES (\
                $1::UUID, $2::UUID, $3::VARCHAR, $4::TEXT, $5::NUMERIC, \
                $6::VARCHAR, $7::VARCHAR, $8::VARCHAR[], \
                $9::BOOL, $10::BOOL, $11::INT2[], \
                $12::INT2, $13::INT8, $14::INT8, $15::TIMESTAMPTZ, \
                $16::VARCHAR, $17::VARCHAR, $18::VARCHAR\
            )",
        );
        self.exec(
            SQL,
            &[
                &id,
                &landlord_id,
                &title,
                &description,
                &price,
                &location,
                &full_address,
                &images,
                &utilities.electricity,
                &utilities.water,
                &nearby_services,
                &status,
                &views,
                &inquiries,
                &created_at,
                &contact_name,
                &contact_phone,
                &contact_email,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

/// Overwrites the editable columns of a stored [`Property`] in a single
/// statement, matching both its ID and its landlord.
///
/// Counters and the creation time are never overwritten. Resolves to `false`
/// if no such [`Property`] is stored anymore.
impl Database<Update<Property>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let Property {
            id,
            landlord_id,
            title,
            description,
            price,
            location,
            full_address,
            images,
            utilities,
            nearby_services,
            status,
            views: _,
            inquiries: _,
            created_at: _,
            landlord_contact,
        } = property;

        let nearby_services =
            nearby_services.iter().copied().collect::<Vec<_>>();
        let (contact_name, contact_phone, contact_email) = landlord_contact
            .map_or((None, None, None), |c| (Some(c.name), c.phone, c.email));

        const SQL: &str = "\
            UPDATE properties \
            SET title = $3::VARCHAR, \
                description = $4::TEXT, \
                price = $5::NUMERIC, \
                location = $6::VARCHAR, \
                full_address = $7::VARCHAR, \
                images = $8::VARCHAR[], \
                has_electricity = $9::BOOL, \
                has_water = $10::BOOL, \
                nearby_services = $11::INT2[], \
                status = $12::INT2, \
                contact_name = $13::VARCHAR, \
                contact_phone = $14::VARCHAR, \
                contact_email = $15::VARCHAR \
            WHERE id = $1::UUID \
              AND landlord_id = $2::UUID";
        let updated = self
            .exec(
                SQL,
                &[
                    &id,
                    &landlord_id,
                    &title,
                    &description,
                    &price,
                    &location,
                    &full_address,
                    &images,
                    &utilities.electricity,
                    &utilities.water,
                    &nearby_services,
                    &status,
                    &contact_name,
                    &contact_phone,
                    &contact_email,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?;
        Ok(updated > 0)
    }
}

impl Database<Delete<By<Property, property::Id>>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM properties \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
