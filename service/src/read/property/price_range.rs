//! [`PriceRange`] definitions.

use std::{fmt, str::FromStr};

use common::money::group_thousands;
use derive_more::{Display, Error};
use rust_decimal::Decimal;

use super::criteria::parse_amount;

/// Predefined price bucket, like `500000-1000000` or `5000000+`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PriceRange {
    /// Inclusive lower bound.
    min: Decimal,

    /// Inclusive upper bound, [`None`] meaning unbounded.
    max: Option<Decimal>,
}

impl PriceRange {
    /// Creates a new [`PriceRange`] if `min` doesn't exceed `max`.
    #[must_use]
    pub fn new(min: Decimal, max: Option<Decimal>) -> Option<Self> {
        max.map_or(true, |max| min <= max)
            .then_some(Self { min, max })
    }

    /// Returns the buckets offered by the browse view, in ascending order.
    #[must_use]
    pub fn presets() -> [Self; 5] {
        let tzs = Decimal::from;
        [
            Self { min: tzs(0), max: Some(tzs(500_000)) },
            Self { min: tzs(500_000), max: Some(tzs(1_000_000)) },
            Self { min: tzs(1_000_000), max: Some(tzs(2_000_000)) },
            Self { min: tzs(2_000_000), max: Some(tzs(5_000_000)) },
            Self { min: tzs(5_000_000), max: None },
        ]
    }

    /// Returns the inclusive lower bound of this [`PriceRange`].
    #[must_use]
    pub fn min(&self) -> Decimal {
        self.min
    }

    /// Returns the inclusive upper bound of this [`PriceRange`], if any.
    #[must_use]
    pub fn max(&self) -> Option<Decimal> {
        self.max
    }

    /// Indicates whether the provided `price` falls into this [`PriceRange`].
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }

    /// Returns a human-readable label of this [`PriceRange`], like
    /// `TZS 500,000 - 1,000,000`.
    #[must_use]
    pub fn to_human(&self) -> String {
        match self.max {
            Some(max) => format!(
                "TZS {} - {}",
                group_thousands(self.min),
                group_thousands(max),
            ),
            None => format!("TZS {}+", group_thousands(self.min)),
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min = self.min.normalize();
        match self.max {
            Some(max) => write!(f, "{min}-{}", max.normalize()),
            None => write!(f, "{min}+"),
        }
    }
}

impl FromStr for PriceRange {
    type Err = ParseError;

    /// Parses `<min>-<max>` or `<min>+` notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (min, max) = match s.strip_suffix('+') {
            Some(min) => (min, None),
            None => {
                let (min, max) = s.split_once('-').ok_or(ParseError)?;
                (min, Some(max))
            }
        };

        let min = parse_amount(min).ok_or(ParseError)?;
        let max = max
            .map(|max| parse_amount(max).ok_or(ParseError))
            .transpose()?;
        Self::new(min, max).ok_or(ParseError)
    }
}

/// Error of parsing a [`PriceRange`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("expected `<min>-<max>` or `<min>+` price range")]
pub struct ParseError;

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::PriceRange;

    fn tzs(amount: i64) -> Decimal {
        Decimal::from(amount)
    }

    #[test]
    fn parses_bounded_range() {
        let range: PriceRange = "500000-1000000".parse().unwrap();

        assert_eq!(range.min(), tzs(500_000));
        assert_eq!(range.max(), Some(tzs(1_000_000)));
        assert_eq!(range.to_string(), "500000-1000000");
    }

    #[test]
    fn parses_open_range() {
        let range: PriceRange = "5000000+".parse().unwrap();

        assert_eq!(range.min(), tzs(5_000_000));
        assert_eq!(range.max(), None);
        assert!(range.contains(tzs(1_000_000_000)));
        assert!(!range.contains(tzs(4_999_999)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let range: PriceRange = "0-500000".parse().unwrap();

        assert!(range.contains(tzs(0)));
        assert!(range.contains(tzs(500_000)));
        assert!(!range.contains(tzs(500_001)));
    }

    #[test]
    fn rejects_malformed() {
        for input in ["", "all", "abc", "100-", "-100", "100-abc", "+", "9-1"] {
            assert!(
                input.parse::<PriceRange>().is_err(),
                "`{input}` should not parse",
            );
        }
    }

    #[test]
    fn presets_round_trip() {
        let rendered = PriceRange::presets()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        assert_eq!(
            rendered,
            [
                "0-500000",
                "500000-1000000",
                "1000000-2000000",
                "2000000-5000000",
                "5000000+",
            ],
        );
        for preset in PriceRange::presets() {
            assert_eq!(preset.to_string().parse::<PriceRange>().unwrap(), preset);
        }
    }

    #[test]
    fn renders_human_label() {
        assert_eq!(
            "500000-1000000".parse::<PriceRange>().unwrap().to_human(),
            "TZS 500,000 - 1,000,000",
        );
        assert_eq!(
            "5000000+".parse::<PriceRange>().unwrap().to_human(),
            "TZS 5,000,000+",
        );
    }
}
