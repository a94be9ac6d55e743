//! [`Query`] collection related to a single [`Property`].

use crate::domain::{property, Property};
#[cfg(doc)]
use crate::Query;

use super::Fetch;

/// Queries a [`Property`] by its [`property::Id`], regardless of its status.
pub type ById = Fetch<Option<Property>, property::Id>;
