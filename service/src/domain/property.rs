//! [`Property`] definitions.

use std::collections::BTreeSet;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, DateTimeOf, Money};
use derive_more::{AsRef, Deref, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::landlord;

/// Rental property listed on the marketplace.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// ID of the landlord owning this [`Property`].
    pub landlord_id: landlord::Id,

    /// [`Title`] of this [`Property`].
    pub title: Title,

    /// [`Description`] of this [`Property`].
    pub description: Description,

    /// Monthly rent of this [`Property`].
    pub price: Money,

    /// [`Location`] of this [`Property`] used for searching.
    pub location: Location,

    /// Full [`Address`] of this [`Property`], if provided.
    pub full_address: Option<Address>,

    /// [`ImageUrl`]s of this [`Property`], in display order.
    pub images: Vec<ImageUrl>,

    /// [`Utilities`] available in this [`Property`].
    pub utilities: Utilities,

    /// [`NearbyServices`] of this [`Property`].
    pub nearby_services: NearbyServices,

    /// [`Status`] of this [`Property`].
    pub status: Status,

    /// Number of times this [`Property`] was viewed.
    pub views: Counter,

    /// Number of inquiries made about this [`Property`].
    pub inquiries: Counter,

    /// [`DateTime`] when this [`Property`] was created, if known.
    pub created_at: Option<CreationDateTime>,

    /// Contact of the landlord, if published.
    pub landlord_contact: Option<landlord::Contact>,
}

impl Property {
    /// Indicates whether this [`Property`] is visible in browse results.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

impl AsRef<Property> for Property {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// ID of a [`Property`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Title of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 256
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Free-text description of a [`Property`]. May be empty.
#[derive(AsRef, Clone, Debug, Default, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (text.len() <= 8192).then_some(Self(text))
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Place name of a [`Property`], like `Mikocheni, Dar es Salaam`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Location(String);

impl Location {
    /// Creates a new [`Location`] if the given `location` is valid.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Option<Self> {
        let location = location.into();
        Self::check(&location).then_some(Self(location))
    }

    /// Checks whether the given `location` is a valid [`Location`].
    fn check(location: impl AsRef<str>) -> bool {
        let location = location.as_ref();
        location.trim() == location
            && !location.is_empty()
            && location.len() <= 512
    }
}

impl FromStr for Location {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Location`")
    }
}

/// Full street address of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address && !address.is_empty() && address.len() <= 512
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// URL of a [`Property`] image.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`ImageUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        rest.is_some_and(|r| !r.is_empty())
            && !url.contains(char::is_whitespace)
            && url.len() <= 2048
    }
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

define_kind! {
    #[doc = "Utility a [`Property`] may be connected to."]
    enum Utility {
        #[doc = "Power supply."]
        Electricity = 1,

        #[doc = "Piped water."]
        Water = 2,
    }
}

/// Flags of [`Utility`]s available in a [`Property`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Utilities {
    /// Whether [`Utility::Electricity`] is available.
    pub electricity: bool,

    /// Whether [`Utility::Water`] is available.
    pub water: bool,
}

impl Utilities {
    /// Indicates whether the provided [`Utility`] is available.
    #[must_use]
    pub fn has(&self, utility: Utility) -> bool {
        match utility {
            Utility::Electricity => self.electricity,
            Utility::Water => self.water,
        }
    }
}

define_kind! {
    #[doc = "Kind of a service near a [`Property`]."]
    enum NearbyService {
        #[doc = "A school."]
        School = 1,

        #[doc = "A hospital or a clinic."]
        Hospital = 2,

        #[doc = "A market or shops."]
        Market = 3,

        #[doc = "A bank or an ATM."]
        Bank = 4,

        #[doc = "Public transport stop."]
        Transport = 5,
    }
}

/// Set of [`NearbyService`]s, free of duplicates by construction.
#[derive(Clone, Debug, Default, Deref, Eq, From, Hash, PartialEq)]
pub struct NearbyServices(BTreeSet<NearbyService>);

impl NearbyServices {
    /// Indicates whether every one of the `required` services is present.
    #[must_use]
    pub fn contains_all(&self, required: &Self) -> bool {
        required.0.is_subset(&self.0)
    }
}

impl FromIterator<NearbyService> for NearbyServices {
    fn from_iter<T: IntoIterator<Item = NearbyService>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

define_kind! {
    #[doc = "Visibility status of a [`Property`]."]
    enum Status {
        #[doc = "Listed and visible in browse results."]
        Active = 1,

        #[doc = "Hidden by its landlord."]
        Inactive = 2,
    }
}

/// Non-negative counter of [`Property`] views or inquiries.
pub type Counter = u32;

/// Marker of a [`Property`] being listed.
#[derive(Clone, Copy, Debug)]
pub enum Listing {}

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<Listing>;

#[cfg(test)]
mod spec {
    use super::{
        ImageUrl, Location, NearbyService, NearbyServices, Title, Utilities,
        Utility,
    };

    #[test]
    fn validates_text_fields() {
        assert!(Title::new("Nyumba ya Kisasa Mikocheni").is_some());
        assert!(Title::new("").is_none());
        assert!(Title::new(" padded ").is_none());

        assert!(Location::new("Njiro, Arusha").is_some());
        assert!(Location::new("   ").is_none());
    }

    #[test]
    fn validates_image_urls() {
        assert!(ImageUrl::new("https://images.example.com/a.jpg").is_some());
        assert!(ImageUrl::new("http://example.com/b.png").is_some());
        assert!(ImageUrl::new("https://").is_none());
        assert!(ImageUrl::new("ftp://example.com/c.png").is_none());
        assert!(ImageUrl::new("https://example.com/with space.png").is_none());
    }

    #[test]
    fn parses_vocabulary_in_kebab_case() {
        assert_eq!(
            "school".parse::<NearbyService>().unwrap(),
            NearbyService::School,
        );
        assert_eq!(NearbyService::Transport.as_str(), "transport");
        assert_eq!(
            "electricity".parse::<Utility>().unwrap(),
            Utility::Electricity,
        );
        assert!("School".parse::<NearbyService>().is_err());
        assert_eq!(NearbyService::ALL.len(), 5);
    }

    #[test]
    fn deduplicates_services() {
        let services: NearbyServices = [
            NearbyService::School,
            NearbyService::Market,
            NearbyService::School,
        ]
        .into_iter()
        .collect();

        assert_eq!(services.len(), 2);
    }

    #[test]
    fn requires_all_services() {
        let have: NearbyServices =
            [NearbyService::School].into_iter().collect();
        let want: NearbyServices = [NearbyService::School, NearbyService::Market]
            .into_iter()
            .collect();

        assert!(!have.contains_all(&want));
        assert!(want.contains_all(&have));
        assert!(have.contains_all(&NearbyServices::default()));
    }

    #[test]
    fn checks_utilities() {
        let utilities = Utilities {
            electricity: true,
            water: false,
        };

        assert!(utilities.has(Utility::Electricity));
        assert!(!utilities.has(Utility::Water));
    }
}
