//! [`Stats`] definitions.

use common::{money::Currency, Money};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::Property;

/// Aggregated figures over the listings of a landlord.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stats {
    /// Number of listings, of any status.
    pub total_listings: u64,

    /// Number of active listings.
    pub active_listings: u64,

    /// Sum of [`Property::views`].
    pub total_views: u64,

    /// Sum of [`Property::inquiries`].
    pub total_inquiries: u64,

    /// Mean monthly rent rounded to whole shillings, or zero when there are
    /// no listings.
    pub average_price: Money,
}

impl Stats {
    /// Computes [`Stats`] of the provided [`Property`]s.
    #[must_use]
    pub fn of<'a, I>(properties: I) -> Self
    where
        I: IntoIterator<Item = &'a Property>,
    {
        let mut stats = Self {
            total_listings: 0,
            active_listings: 0,
            total_views: 0,
            total_inquiries: 0,
            average_price: Money::zero(Currency::Tzs),
        };
        let mut price_sum = Some(Decimal::ZERO);
        for p in properties {
            stats.total_listings += 1;
            stats.active_listings += u64::from(p.is_active());
            stats.total_views += u64::from(p.views);
            stats.total_inquiries += u64::from(p.inquiries);
            price_sum =
                price_sum.and_then(|sum| sum.checked_add(p.price.amount()));
        }

        match price_sum {
            Some(sum) if stats.total_listings > 0 => {
                let average = (sum / Decimal::from(stats.total_listings))
                    .round_dp_with_strategy(
                        0,
                        RoundingStrategy::MidpointAwayFromZero,
                    );
                stats.average_price =
                    Money::tzs(average).unwrap_or(stats.average_price);
            }
            Some(_) => {}
            None => tracing::warn!(
                listings = stats.total_listings,
                "sum of listing prices overflowed, reporting zero average",
            ),
        }
        stats
    }
}
