//! Domain definitions.

pub mod favorites;
pub mod landlord;
pub mod property;

pub use self::{favorites::Favorites, property::Property};
