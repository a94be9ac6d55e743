//! [`Favorites`] definitions.

use std::collections::BTreeSet;

use crate::domain::property;
#[cfg(doc)]
use crate::domain::Property;

/// Set of [`Property`]s favorited during a single browsing session.
///
/// Nothing is persisted: the set lives as long as its owner does.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Favorites(BTreeSet<property::Id>);

impl Favorites {
    /// Creates a new empty [`Favorites`] set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the provided [`Property`] in this [`Favorites`] set: removes
    /// it if favorited already, or adds it otherwise.
    ///
    /// Returns whether the [`Property`] is favorited after the toggle.
    pub fn toggle(&mut self, id: property::Id) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            _ = self.0.insert(id);
            true
        }
    }

    /// Indicates whether the provided [`Property`] is favorited.
    #[must_use]
    pub fn is_favorited(&self, id: property::Id) -> bool {
        self.0.contains(&id)
    }

    /// Returns the number of favorited [`Property`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether no [`Property`] is favorited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the favorited [`Property`] IDs in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = property::Id> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<property::Id> for Favorites {
    fn from_iter<T: IntoIterator<Item = property::Id>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod spec {
    use super::Favorites;
    use crate::domain::property;

    #[test]
    fn toggle_adds_then_removes() {
        let id = property::Id::new();
        let mut favorites = Favorites::new();

        assert!(favorites.toggle(id));
        assert!(favorites.is_favorited(id));

        assert!(!favorites.toggle(id));
        assert!(!favorites.is_favorited(id));
    }

    #[test]
    fn double_toggle_restores_state() {
        let (kept, toggled) = (property::Id::new(), property::Id::new());
        let original: Favorites = [kept].into_iter().collect();

        let mut favorites = original.clone();
        _ = favorites.toggle(toggled);
        _ = favorites.toggle(toggled);
        assert_eq!(favorites, original);

        _ = favorites.toggle(kept);
        _ = favorites.toggle(kept);
        assert_eq!(favorites, original);
    }

    #[test]
    fn membership_is_per_id() {
        let (a, b) = (property::Id::new(), property::Id::new());
        let mut favorites = Favorites::new();
        _ = favorites.toggle(a);

        assert!(favorites.is_favorited(a));
        assert!(!favorites.is_favorited(b));
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites.iter().collect::<Vec<_>>(), vec![a]);
    }
}
