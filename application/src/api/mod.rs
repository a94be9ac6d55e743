//! GraphQL API definitions.

pub mod browse;
pub mod criteria;
pub mod dashboard;
pub mod favorites;
pub mod landlord;
mod mutation;
pub mod property;
mod query;
pub mod scalar;

use juniper::EmptySubscription;

use crate::Context;

pub use self::{
    browse::BrowseResult,
    criteria::CriteriaInput,
    dashboard::Dashboard,
    mutation::Mutation,
    property::Property,
    query::Query,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
