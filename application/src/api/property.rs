//! [`Property`]-related definitions.

use common::{DateTime, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, Into};
use itertools::Itertools as _;
use juniper::{
    graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLObject,
    GraphQLScalar, Nullable,
};
use rust_decimal::Decimal;
use service::{command, domain};
use uuid::Uuid;

use crate::{
    api::{landlord, scalar},
    AsError, Context, Error,
};

/// A rental property listing.
#[derive(Clone, Debug)]
pub struct Property {
    /// Underlying [`domain::Property`].
    property: domain::Property,

    /// Indicator whether the viewer has favorited this [`Property`].
    is_favorited: bool,
}

impl Property {
    /// Wraps the provided [`domain::Property`], marking it as favorited if it
    /// belongs to the provided [`domain::Favorites`].
    #[must_use]
    pub fn new(
        property: domain::Property,
        favorites: &domain::Favorites,
    ) -> Self {
        Self {
            is_favorited: favorites.is_favorited(property.id),
            property,
        }
    }
}

impl From<domain::Property> for Property {
    fn from(property: domain::Property) -> Self {
        Self {
            property,
            is_favorited: false,
        }
    }
}

/// A rental property listing.
#[graphql_object(context = Context)]
impl Property {
    /// Unique identifier of this `Property`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.property.id.into()
    }

    /// ID of the landlord listing this `Property`.
    #[must_use]
    pub fn landlord_id(&self) -> landlord::Id {
        self.property.landlord_id.into()
    }

    /// Title of this `Property`.
    #[must_use]
    pub fn title(&self) -> Title {
        self.property.title.clone().into()
    }

    /// Description of this `Property`.
    #[must_use]
    pub fn description(&self) -> Description {
        self.property.description.clone().into()
    }

    /// Monthly rent of this `Property`.
    #[must_use]
    pub fn price(&self) -> Money {
        self.property.price
    }

    /// Monthly rent of this `Property` formatted for display, like
    /// `TZS 800,000`.
    #[must_use]
    pub fn price_label(&self) -> String {
        self.property.price.to_human()
    }

    /// Area this `Property` is located in.
    #[must_use]
    pub fn location(&self) -> Location {
        self.property.location.clone().into()
    }

    /// Full street address of this `Property`, if published.
    #[must_use]
    pub fn full_address(&self) -> Option<Address> {
        self.property.full_address.clone().map(Into::into)
    }

    /// Photos of this `Property`, in display order.
    #[must_use]
    pub fn images(&self) -> Vec<ImageUrl> {
        self.property.images.iter().cloned().map(Into::into).collect()
    }

    /// Utilities this `Property` is connected to.
    #[must_use]
    pub fn utilities(&self) -> Utilities {
        self.property.utilities.into()
    }

    /// Services near this `Property`.
    #[must_use]
    pub fn nearby_services(&self) -> Vec<NearbyService> {
        self.property
            .nearby_services
            .iter()
            .copied()
            .map(Into::into)
            .collect()
    }

    /// Visibility status of this `Property`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.property.status.into()
    }

    /// Number of times this `Property` has been viewed.
    pub fn views(&self) -> Result<i32, Error> {
        i32::try_from(self.property.views).map_err(AsError::into_error)
    }

    /// Number of inquiries sent about this `Property`.
    pub fn inquiries(&self) -> Result<i32, Error> {
        i32::try_from(self.property.inquiries).map_err(AsError::into_error)
    }

    /// `DateTime` when this `Property` was listed, if known.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime> {
        self.property.created_at.map(DateTimeOf::coerce)
    }

    /// Published contact of the landlord.
    #[must_use]
    pub fn landlord_contact(&self) -> Option<landlord::Contact> {
        self.property.landlord_contact.clone().map(Into::into)
    }

    /// Indicator whether the viewer has favorited this `Property`.
    #[must_use]
    pub fn is_favorited(&self) -> bool {
        self.is_favorited
    }
}

/// Unique identifier of a `Property`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::property::Id)]
#[into(domain::property::Id)]
#[graphql(name = "PropertyId", transparent)]
pub struct Id(Uuid);

/// Title of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyTitle",
    with = scalar::Via::<domain::property::Title>,
)]
pub struct Title(domain::property::Title);

/// Description of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyDescription",
    with = scalar::Via::<domain::property::Description>,
)]
pub struct Description(domain::property::Description);

/// Area a `Property` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyLocation",
    with = scalar::Via::<domain::property::Location>,
)]
pub struct Location(domain::property::Location);

/// Full street address of a `Property`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyAddress",
    with = scalar::Via::<domain::property::Address>,
)]
pub struct Address(domain::property::Address);

/// URL of a `Property` photo.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PropertyImageUrl",
    with = scalar::Via::<domain::property::ImageUrl>,
)]
pub struct ImageUrl(domain::property::ImageUrl);

/// Utilities a `Property` is connected to.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "PropertyUtilities")]
pub struct Utilities {
    /// Power supply.
    pub electricity: bool,

    /// Piped water.
    pub water: bool,
}

/// Utilities a `Property` is connected to.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
#[graphql(name = "PropertyUtilitiesInput")]
pub struct UtilitiesInput {
    /// Power supply.
    pub electricity: bool,

    /// Piped water.
    pub water: bool,
}

impl From<domain::property::Utilities> for Utilities {
    fn from(u: domain::property::Utilities) -> Self {
        Self {
            electricity: u.electricity,
            water: u.water,
        }
    }
}

impl From<UtilitiesInput> for domain::property::Utilities {
    fn from(u: UtilitiesInput) -> Self {
        Self {
            electricity: u.electricity,
            water: u.water,
        }
    }
}

/// Utility a `Property` may be connected to.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum Utility {
    /// Power supply.
    Electricity,

    /// Piped water.
    Water,
}

impl From<domain::property::Utility> for Utility {
    fn from(u: domain::property::Utility) -> Self {
        use domain::property::Utility as U;
        match u {
            U::Electricity => Self::Electricity,
            U::Water => Self::Water,
        }
    }
}

impl From<Utility> for domain::property::Utility {
    fn from(u: Utility) -> Self {
        match u {
            Utility::Electricity => Self::Electricity,
            Utility::Water => Self::Water,
        }
    }
}

/// Kind of a service near a `Property`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
pub enum NearbyService {
    /// A school.
    School,

    /// A hospital or a clinic.
    Hospital,

    /// A market or shops.
    Market,

    /// A bank or an ATM.
    Bank,

    /// Public transport stop.
    Transport,
}

impl From<domain::property::NearbyService> for NearbyService {
    fn from(s: domain::property::NearbyService) -> Self {
        use domain::property::NearbyService as S;
        match s {
            S::School => Self::School,
            S::Hospital => Self::Hospital,
            S::Market => Self::Market,
            S::Bank => Self::Bank,
            S::Transport => Self::Transport,
        }
    }
}

impl From<NearbyService> for domain::property::NearbyService {
    fn from(s: NearbyService) -> Self {
        match s {
            NearbyService::School => Self::School,
            NearbyService::Hospital => Self::Hospital,
            NearbyService::Market => Self::Market,
            NearbyService::Bank => Self::Bank,
            NearbyService::Transport => Self::Transport,
        }
    }
}

/// Visibility status of a `Property`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "PropertyStatus")]
pub enum Status {
    /// Listed and visible in browse results.
    Active,

    /// Hidden by its landlord.
    Inactive,
}

impl From<domain::property::Status> for Status {
    fn from(s: domain::property::Status) -> Self {
        use domain::property::Status as S;
        match s {
            S::Active => Self::Active,
            S::Inactive => Self::Inactive,
        }
    }
}

impl From<Status> for domain::property::Status {
    fn from(s: Status) -> Self {
        match s {
            Status::Active => Self::Active,
            Status::Inactive => Self::Inactive,
        }
    }
}

/// Details of a new `Property` listing.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "PropertyInput")]
pub struct PropertyInput {
    /// Title of the listing.
    pub title: String,

    /// Description of the listing.
    pub description: Option<String>,

    /// Monthly rent in shillings, like `800000` or `800,000`.
    pub price: String,

    /// Area the `Property` is located in.
    pub location: String,

    /// Full street address.
    pub full_address: Option<String>,

    /// Photo URLs, in display order.
    pub images: Option<Vec<String>>,

    /// Connected utilities.
    pub utilities: Option<UtilitiesInput>,

    /// Services nearby.
    pub nearby_services: Option<Vec<NearbyService>>,

    /// Landlord contact to publish.
    pub landlord_contact: Option<landlord::ContactInput>,
}

impl PropertyInput {
    /// Validates this [`PropertyInput`] into a [`command::CreateProperty`]
    /// of the provided landlord.
    ///
    /// # Errors
    ///
    /// `INVALID_PROPERTY` naming every invalid field.
    pub fn validate(
        self,
        landlord_id: landlord::Id,
    ) -> Result<command::CreateProperty, Error> {
        use domain::property as p;

        let Self {
            title,
            description,
            price,
            location,
            full_address,
            images,
            utilities,
            nearby_services,
            landlord_contact,
        } = self;

        let mut v = Validator::default();
        let title = v.check("title", p::Title::new(title.trim()));
        let description = v.check(
            "description",
            p::Description::new(description.unwrap_or_default()),
        );
        let price = v.check("price", parse_price(&price));
        let location = v.check("location", p::Location::new(location.trim()));
        let full_address = v.optional("fullAddress", full_address, |a| {
            p::Address::new(a.trim())
        });
        let images = v.images(images.unwrap_or_default());
        let landlord_contact = landlord_contact.and_then(|c| v.contact(c));
        v.finish()?;

        match (title, description, price, location) {
            (Some(title), Some(description), Some(price), Some(location)) => {
                Ok(command::CreateProperty {
                    landlord_id: landlord_id.into(),
                    title,
                    description,
                    price,
                    location,
                    full_address,
                    images,
                    utilities: utilities.map(Into::into).unwrap_or_default(),
                    nearby_services: nearby_services
                        .unwrap_or_default()
                        .into_iter()
                        .map(Into::into)
                        .collect(),
                    landlord_contact,
                })
            }
            _ => Err(Error::internal(&"validated `PropertyInput` is partial")),
        }
    }
}

/// Changes to an existing `Property` listing.
///
/// Omitted fields are left intact. An explicit `null` clears `fullAddress`
/// and `landlordContact`.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "PropertyPatch")]
pub struct PropertyPatch {
    /// New title.
    pub title: Option<String>,

    /// New description.
    pub description: Option<String>,

    /// New monthly rent in shillings.
    pub price: Option<String>,

    /// New area.
    pub location: Option<String>,

    /// New full street address.
    pub full_address: Nullable<String>,

    /// New photo URLs.
    pub images: Option<Vec<String>>,

    /// New connected utilities.
    pub utilities: Option<UtilitiesInput>,

    /// New nearby services.
    pub nearby_services: Option<Vec<NearbyService>>,

    /// New published landlord contact.
    pub landlord_contact: Nullable<landlord::ContactInput>,
}

impl PropertyPatch {
    /// Validates this [`PropertyPatch`] into a [`command::UpdateProperty`]
    /// of the provided `Property` and landlord.
    ///
    /// # Errors
    ///
    /// `INVALID_PROPERTY` naming every invalid field.
    pub fn validate(
        self,
        property_id: Id,
        landlord_id: landlord::Id,
    ) -> Result<command::UpdateProperty, Error> {
        use domain::property as p;

        let Self {
            title,
            description,
            price,
            location,
            full_address,
            images,
            utilities,
            nearby_services,
            landlord_contact,
        } = self;

        let mut v = Validator::default();
        let title =
            title.and_then(|t| v.check("title", p::Title::new(t.trim())));
        let description = description
            .and_then(|d| v.check("description", p::Description::new(d)));
        let price = price.and_then(|s| v.check("price", parse_price(&s)));
        let location = location
            .and_then(|l| v.check("location", p::Location::new(l.trim())));
        let full_address = explicit(full_address).map(|a| {
            v.optional("fullAddress", a, |a| p::Address::new(a.trim()))
        });
        let images = images.map(|i| v.images(i));
        let landlord_contact =
            explicit(landlord_contact).map(|c| c.and_then(|c| v.contact(c)));
        v.finish()?;

        Ok(command::UpdateProperty {
            property_id: property_id.into(),
            landlord_id: landlord_id.into(),
            title,
            description,
            price,
            location,
            full_address,
            images,
            utilities: utilities.map(Into::into),
            nearby_services: nearby_services
                .map(|s| s.into_iter().map(Into::into).collect()),
            landlord_contact,
        })
    }
}

/// Collector of invalid input field names.
#[derive(Debug, Default)]
struct Validator {
    /// Names of the invalid fields, in input order.
    invalid: Vec<&'static str>,
}

impl Validator {
    /// Records the `field` as invalid if its `value` is [`None`].
    fn check<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.invalid.push(field);
        }
        value
    }

    /// Validates an optional `field`, treating blank input as absent.
    fn optional<T>(
        &mut self,
        field: &'static str,
        input: Option<String>,
        parse: impl FnOnce(String) -> Option<T>,
    ) -> Option<T> {
        let input = input.filter(|s| !s.trim().is_empty())?;
        self.check(field, parse(input))
    }

    /// Validates every image URL, skipping the invalid ones.
    fn images(
        &mut self,
        urls: Vec<String>,
    ) -> Vec<domain::property::ImageUrl> {
        let (valid, invalid): (Vec<_>, Vec<_>) = urls
            .into_iter()
            .map(|u| domain::property::ImageUrl::new(u.trim()))
            .partition(Option::is_some);
        if !invalid.is_empty() {
            self.invalid.push("images");
        }
        valid.into_iter().flatten().collect()
    }

    /// Validates the landlord contact.
    fn contact(
        &mut self,
        input: landlord::ContactInput,
    ) -> Option<domain::landlord::Contact> {
        input
            .validate()
            .map_err(|fields| self.invalid.extend(fields))
            .ok()
    }

    /// Fails if any of the checked fields is invalid.
    fn finish(self) -> Result<(), Error> {
        if self.invalid.is_empty() {
            return Ok(());
        }
        Err(Error::bad_request(
            "INVALID_PROPERTY",
            &format!(
                "Invalid `Property` fields: {}",
                self.invalid.iter().format_with(", ", |f, w| w(&format_args!(
                    "`{f}`"
                ))),
            ),
        ))
    }
}

/// Parses a monthly rent amount typed by a landlord.
fn parse_price(input: &str) -> Option<Money> {
    input
        .trim()
        .replace(',', "")
        .parse::<Decimal>()
        .ok()
        .and_then(Money::tzs)
}

/// Distinguishes an omitted value from an explicit `null`.
fn explicit<T>(value: Nullable<T>) -> Option<Option<T>> {
    match value {
        Nullable::ImplicitNull => None,
        Nullable::ExplicitNull => Some(None),
        Nullable::Some(v) => Some(Some(v)),
    }
}
