//! [`Query`] collection related to multiple [`Property`]s.

use crate::{
    domain::{landlord, Property},
    read,
};
#[cfg(doc)]
use crate::{domain::property::Status, Query};

use super::Fetch;

/// Queries all the [`Status::Active`] [`Property`]s.
pub type ListActive = Fetch<Vec<Property>, read::property::Active>;

/// Queries all the [`Property`]s of a landlord, of any [`Status`].
pub type OfLandlord = Fetch<Vec<Property>, landlord::Id>;
