//! Landlord-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLInputObject, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api::scalar, Context};

/// Unique identifier of a landlord.
#[derive(Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq)]
#[from(domain::landlord::Id)]
#[into(domain::landlord::Id)]
#[graphql(name = "LandlordId", transparent)]
pub struct Id(Uuid);

/// Published contact of a landlord.
#[derive(Clone, Debug, From, Into)]
pub struct Contact(domain::landlord::Contact);

/// Published contact of a landlord.
#[graphql_object(name = "LandlordContact", context = Context)]
impl Contact {
    /// Name to address the landlord by.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Phone number of the landlord, if published.
    #[must_use]
    pub fn phone(&self) -> Option<Phone> {
        self.0.phone.clone().map(Into::into)
    }

    /// Email address of the landlord, if published.
    #[must_use]
    pub fn email(&self) -> Option<Email> {
        self.0.email.clone().map(Into::into)
    }
}

/// Name of a landlord.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "LandlordName",
    with = scalar::Via::<domain::landlord::Name>,
)]
pub struct Name(domain::landlord::Name);

/// Phone number of a landlord.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "LandlordPhone",
    with = scalar::Via::<domain::landlord::Phone>,
)]
pub struct Phone(domain::landlord::Phone);

/// Email address of a landlord.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "LandlordEmail",
    with = scalar::Via::<domain::landlord::Email>,
)]
pub struct Email(domain::landlord::Email);

/// Contact of a landlord to publish along with a listing.
///
/// Values are validated when the listing is saved.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "LandlordContactInput")]
pub struct ContactInput {
    /// Name to address the landlord by.
    pub name: String,

    /// Phone number, like `+255712345678` or `0712 345 678`.
    pub phone: Option<String>,

    /// Email address.
    pub email: Option<String>,
}

impl ContactInput {
    /// Validates this [`ContactInput`] into a [`domain::landlord::Contact`].
    ///
    /// # Errors
    ///
    /// With the names of the invalid fields.
    pub fn validate(
        self,
    ) -> Result<domain::landlord::Contact, Vec<&'static str>> {
        use domain::landlord::{Email, Name, Phone};

        let Self { name, phone, email } = self;

        let mut invalid = Vec::new();
        let name = Name::new(name.trim());
        if name.is_none() {
            invalid.push("contact.name");
        }
        let phone = match phone.filter(|p| !p.trim().is_empty()) {
            Some(p) => {
                let phone = Phone::new(p.trim());
                if phone.is_none() {
                    invalid.push("contact.phone");
                }
                phone
            }
            None => None,
        };
        let email = match email.filter(|e| !e.trim().is_empty()) {
            Some(e) => {
                let email = Email::new(e.trim());
                if email.is_none() {
                    invalid.push("contact.email");
                }
                email
            }
            None => None,
        };

        match name {
            Some(name) if invalid.is_empty() => {
                Ok(domain::landlord::Contact { name, phone, email })
            }
            _ => Err(invalid),
        }
    }
}

#[cfg(test)]
mod spec {
    use super::ContactInput;

    #[test]
    fn trims_and_validates_contact() {
        let contact = ContactInput {
            name: " Mwalimu John ".into(),
            phone: Some("0712 345 678".into()),
            email: Some("".into()),
        }
        .validate()
        .unwrap();

        assert_eq!(contact.name.to_string(), "Mwalimu John");
        assert!(contact.phone.is_some());
        assert!(contact.email.is_none());
    }

    #[test]
    fn reports_every_invalid_field() {
        let invalid = ContactInput {
            name: String::new(),
            phone: Some("call me".into()),
            email: Some("john@example".into()),
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            invalid,
            ["contact.name", "contact.phone", "contact.email"],
        );
    }
}
