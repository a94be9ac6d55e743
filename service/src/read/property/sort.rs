//! [`SortKey`] definitions.

use std::cmp::Ordering;

use common::define_kind;

use crate::domain::Property;

define_kind! {
    #[doc = "Order of [`Property`]s in browse results."]
    enum SortKey {
        #[doc = "Most recently created first."]
        Newest = 1,

        #[doc = "Cheapest first."]
        PriceLow = 2,

        #[doc = "Most expensive first."]
        PriceHigh = 3,
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Newest
    }
}

impl SortKey {
    /// Compares two [`Property`]s according to this [`SortKey`].
    ///
    /// The returned [`Ordering`] is total, so it's safe to use with stable
    /// sorting, which keeps equal [`Property`]s in their original order.
    ///
    /// For [`SortKey::Newest`], a [`Property`] without a creation time goes
    /// after any dated one, and two undated ones compare as equal.
    #[must_use]
    pub fn compare(self, a: &Property, b: &Property) -> Ordering {
        match self {
            Self::PriceLow => a.price.amount().cmp(&b.price.amount()),
            Self::PriceHigh => b.price.amount().cmp(&a.price.amount()),
            Self::Newest => match (a.created_at, b.created_at) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }

    /// Sorts the provided [`Property`]s according to this [`SortKey`],
    /// preserving the relative order of equal ones.
    pub fn sort<P: AsRef<Property>>(self, properties: &mut [P]) {
        properties.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }
}

#[cfg(test)]
mod spec {
    use super::SortKey;
    use crate::read::property::tests::{property, tags};

    #[test]
    fn parses_url_values() {
        assert_eq!("newest".parse::<SortKey>().unwrap(), SortKey::Newest);
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
        assert_eq!(
            "price-high".parse::<SortKey>().unwrap(),
            SortKey::PriceHigh,
        );
        assert!("cheapest".parse::<SortKey>().is_err());
        assert_eq!(SortKey::default(), SortKey::Newest);
    }

    #[test]
    fn price_low_is_ascending_and_stable() {
        let mut props = vec![
            property("a").price(900_000).build(),
            property("b").price(400_000).build(),
            property("c").price(900_000).build(),
            property("d").price(400_000).build(),
        ];

        SortKey::PriceLow.sort(&mut props);

        assert_eq!(tags(&props), ["b", "d", "a", "c"]);
    }

    #[test]
    fn price_high_is_descending_and_stable() {
        let mut props = vec![
            property("a").price(400_000).build(),
            property("b").price(900_000).build(),
            property("c").price(400_000).build(),
            property("d").price(1_200_000).build(),
        ];

        SortKey::PriceHigh.sort(&mut props);

        assert_eq!(tags(&props), ["d", "b", "a", "c"]);
    }

    #[test]
    fn newest_goes_first() {
        let mut props = vec![
            property("old").created_at(1_700_000_000).build(),
            property("new").created_at(1_700_500_000).build(),
            property("mid").created_at(1_700_200_000).build(),
        ];

        SortKey::Newest.sort(&mut props);

        assert_eq!(tags(&props), ["new", "mid", "old"]);
    }

    #[test]
    fn newest_keeps_undated_in_place_relative_to_each_other() {
        let mut props = vec![
            property("x").build(),
            property("dated").created_at(1_700_000_000).build(),
            property("y").build(),
            property("z").build(),
        ];

        SortKey::Newest.sort(&mut props);

        assert_eq!(tags(&props), ["dated", "x", "y", "z"]);
    }

    #[test]
    fn newest_without_dates_is_identity() {
        let mut props = vec![
            property("3").build(),
            property("1").build(),
            property("2").build(),
        ];

        SortKey::Newest.sort(&mut props);

        assert_eq!(tags(&props), ["3", "1", "2"]);
    }

    #[test]
    fn sorting_twice_is_deterministic() {
        let props = vec![
            property("a").created_at(1_700_000_000).build(),
            property("b").build(),
            property("c").created_at(1_700_000_000).build(),
            property("d").created_at(1_800_000_000).build(),
        ];

        let mut once = props.clone();
        SortKey::Newest.sort(&mut once);
        let mut twice = once.clone();
        SortKey::Newest.sort(&mut twice);

        assert_eq!(tags(&once), tags(&twice));
        assert_eq!(tags(&once), ["d", "a", "c", "b"]);
    }
}
