//! Landlord definitions.

use std::sync::LazyLock;

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Property;

/// ID of a landlord owning [`Property`]s.
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
    PartialEq,
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

/// Contact details of a landlord published along with a [`Property`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contact {
    /// [`Name`] of the landlord.
    pub name: Name,

    /// [`Phone`] of the landlord, if published.
    pub phone: Option<Phone>,

    /// [`Email`] of the landlord, if published.
    pub email: Option<Email>,
}

/// Name of a landlord, like `Mzee Hassan`.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name
            && !name.is_empty()
            && name.chars().count() <= 100
            && !name.chars().any(char::is_control)
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Phone number of a landlord.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    ///
    /// Accepts both local (`0712 345 678`) and international
    /// (`+255712345678`) notations.
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(\+?\d{1,3}[-\s]?)?\d{3,4}[-\s]?\d{3}[-\s]?\d{3,4}$")
                .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Email address of a landlord.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Email, Name, Phone};

    #[test]
    fn validates_phone() {
        assert!(Phone::new("+255712345678").is_some());
        assert!(Phone::new("0712 345 678").is_some());
        assert!(Phone::new("0712-345-678").is_some());
        assert!(Phone::new("12345").is_none());
        assert!(Phone::new("call me").is_none());
    }

    #[test]
    fn validates_email() {
        assert!(Email::new("john@example.com").is_some());
        assert!(Email::new("mary.w@mail.co.tz").is_some());
        assert!(Email::new("john@example").is_none());
        assert!(Email::new("john example.com").is_none());
        assert!(Email::new("@example.com").is_none());
    }

    #[test]
    fn validates_name() {
        assert!(Name::new("Mwalimu John").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" Bi. Mary").is_none());
    }
}
