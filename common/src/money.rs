//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Non-negative amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    amount: Decimal,

    /// [`Currency`] of this amount.
    currency: Currency,
}

impl Money {
    /// Maximum amount of a [`Money`], in whole units.
    pub const MAX_UNITS: u64 = 1_000_000_000_000_000;

    /// Creates a new [`Money`] if the provided `amount` is not negative and
    /// doesn't exceed [`Money::MAX_UNITS`].
    #[must_use]
    pub fn new(amount: Decimal, currency: Currency) -> Option<Self> {
        let in_range = (!amount.is_sign_negative() || amount.is_zero())
            && amount <= Decimal::from(Self::MAX_UNITS);
        in_range.then_some(Self { amount, currency })
    }

    /// Creates a zero [`Money`] amount in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Creates a new [`Money`] in Tanzanian shillings.
    #[must_use]
    pub fn tzs(amount: Decimal) -> Option<Self> {
        Self::new(amount, Currency::Tzs)
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the [`Currency`] of this [`Money`].
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns a human-readable representation of this [`Money`], like
    /// `TZS 1,250,000`.
    #[must_use]
    pub fn to_human(&self) -> String {
        format!("{} {}", self.currency.code(), group_thousands(self.amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        let code = currency.code();
        match amount.is_integer().then(|| amount.to_i128()).flatten() {
            Some(int) => write!(f, "{int}{code}"),
            None => write!(f, "{}{code}", amount.normalize()),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency = currency
            .to_ascii_lowercase()
            .parse::<Currency>()
            .map_err(|_| "invalid currency")?;

        Self::new(amount, currency).ok_or("amount out of range")
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Tanzanian shilling."]
        Tzs = 1,
    }
}

impl Currency {
    /// Returns the ISO 4217 code of this [`Currency`].
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Tzs => "TZS",
        }
    }
}

/// Formats the provided `amount` rounded to whole units with `,` separated
/// thousands.
#[must_use]
pub fn group_thousands(amount: Decimal) -> String {
    let rounded = amount.round().abs().to_string();
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, c) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if amount.round().is_sign_negative() && !amount.round().is_zero() {
        out.insert(0, '-');
    }
    out
}

#[cfg(feature = "postgres")]
mod postgres {
    //! Module providing integration with [`postgres_types`] crate.

    use postgres_types::{
        accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql,
        Type,
    };
    use rust_decimal::Decimal;

    use super::{Currency, Money};

    type BoxError = Box<dyn std::error::Error + Sync + Send>;

    /// Stored as `NUMERIC` amount, [`Currency`] being implied by the column.
    impl FromSql<'_> for Money {
        accepts!(NUMERIC);

        fn from_sql(ty: &Type, raw: &[u8]) -> Result<Self, BoxError> {
            let amount = Decimal::from_sql(ty, raw)?;
            Self::new(amount, Currency::Tzs)
                .ok_or_else(|| {
                    format!("`Money` amount out of range: {amount}").into()
                })
        }
    }

    impl ToSql for Money {
        accepts!(NUMERIC);
        to_sql_checked!();

        fn to_sql(
            &self,
            ty: &Type,
            w: &mut BytesMut,
        ) -> Result<IsNull, BoxError> {
            self.amount.to_sql(ty, w)
        }
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is a non-negative integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code (`TZS`).
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{group_thousands, Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn rejects_negative_amount() {
        assert!(Money::tzs(decimal("-1")).is_none());
        assert!(Money::tzs(decimal("0")).is_some());
        assert!(Money::tzs(decimal("-0")).is_some());
        assert!(Money::from_str("-5TZS").is_err());
    }

    #[test]
    fn rejects_amount_above_max() {
        let max = Decimal::from(Money::MAX_UNITS);
        assert!(Money::tzs(max).is_some());
        assert!(Money::tzs(max + decimal("0.01")).is_none());
        assert!(Money::tzs(decimal("50000000000000000000000000000")).is_none());
        assert!(Money::from_str("1000000000000000001TZS").is_err());
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("800000TZS").unwrap(),
            Money::tzs(decimal("800000")).unwrap(),
        );
        assert_eq!(
            Money::from_str("1250.50tzs").unwrap(),
            Money::new(decimal("1250.50"), Currency::Tzs).unwrap(),
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45US").is_err());
        assert!(Money::from_str("123USD").is_err());
        assert!(Money::from_str("TZS").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money::tzs(decimal("800000")).unwrap().to_string(),
            "800000TZS",
        );
        assert_eq!(
            Money::tzs(decimal("800000.00")).unwrap().to_string(),
            "800000TZS",
        );
        assert_eq!(
            Money::tzs(decimal("12.50")).unwrap().to_string(),
            "12.5TZS",
        );
    }

    #[test]
    fn to_human() {
        assert_eq!(
            Money::tzs(decimal("1250000")).unwrap().to_human(),
            "TZS 1,250,000",
        );
        assert_eq!(Money::tzs(decimal("0")).unwrap().to_human(), "TZS 0");
        assert_eq!(Money::tzs(decimal("999")).unwrap().to_human(), "TZS 999");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(decimal("500000")), "500,000");
        assert_eq!(group_thousands(decimal("1000")), "1,000");
        assert_eq!(group_thousands(decimal("100")), "100");
        assert_eq!(group_thousands(decimal("1234567.6")), "1,234,568");
        assert_eq!(group_thousands(decimal("-2500")), "-2,500");
    }
}
