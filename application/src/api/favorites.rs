//! Favorites-related definitions.

use juniper::GraphQLObject;
use service::domain;

use crate::api::property;

/// Favorites of a viewer after toggling one of them.
///
/// Favorites are kept by the client and sent along with the requests that
/// need them.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "FavoriteToggle")]
pub struct Toggle {
    /// Favorited `Property` IDs after the toggle.
    pub favorites: Vec<property::Id>,

    /// Indicator whether the toggled `Property` is favorited now.
    pub is_favorited: bool,
}

impl Toggle {
    /// Toggles the `id` in the provided `favorites`.
    #[must_use]
    pub fn apply(favorites: Vec<property::Id>, id: property::Id) -> Self {
        let mut favorites = collect(favorites);
        let is_favorited = favorites.toggle(id.into());
        Self {
            favorites: favorites.iter().map(Into::into).collect(),
            is_favorited,
        }
    }
}

/// Collects the client-provided IDs into [`domain::Favorites`].
#[must_use]
pub fn collect<I>(ids: I) -> domain::Favorites
where
    I: IntoIterator<Item = property::Id>,
{
    ids.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod spec {
    use service::domain;

    use super::Toggle;
    use crate::api::property;

    #[test]
    fn toggles_client_favorites() {
        let (a, b) = (
            property::Id::from(domain::property::Id::new()),
            property::Id::from(domain::property::Id::new()),
        );

        let added = Toggle::apply(vec![a], b);
        assert!(added.is_favorited);
        assert_eq!(added.favorites.len(), 2);

        let removed = Toggle::apply(added.favorites, b);
        assert!(!removed.is_favorited);
        assert_eq!(removed.favorites, vec![a]);
    }

    #[test]
    fn duplicate_ids_collapse() {
        let a = property::Id::from(domain::property::Id::new());

        let toggled = Toggle::apply(vec![a, a], a);

        assert!(!toggled.is_favorited);
        assert!(toggled.favorites.is_empty());
    }
}
