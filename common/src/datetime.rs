//! Date and time utilities.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{cmp::Ordering, marker::PhantomData};

use derive_more::{Debug, Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{format_description::well_known::Rfc3339, UtcOffset};

/// Date and time not bound to any particular event.
pub type DateTime = DateTimeOf;

/// Date and time in UTC, truncated to microseconds (the precision Postgres
/// keeps).
///
/// `Of` names the event this [`DateTime`] marks (a listing creation, for
/// example), so timestamps of different events are not compared by mistake.
/// Use [`DateTimeOf::coerce()`] to convert between them explicitly.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// UTC date and time with zero sub-microsecond part.
    inner: time::OffsetDateTime,

    /// Event marked by this [`DateTimeOf`].
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Returns the current [`DateTime`].
    #[must_use]
    pub fn now() -> Self {
        let now = time::OffsetDateTime::now_utc();
        Self {
            inner: truncate(now).unwrap_or(now),
            _of: PhantomData,
        }
    }

    /// Creates a [`DateTime`] out of Unix `seconds`.
    ///
    /// [`None`] is returned if `seconds` are out of the supported range.
    #[must_use]
    pub fn from_unix_timestamp(seconds: i64) -> Option<Self> {
        time::OffsetDateTime::from_unix_timestamp(seconds)
            .ok()
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
    }

    /// Parses a [RFC 3339] string, converting it to UTC.
    ///
    /// # Errors
    ///
    /// If the `input` is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        let parsed = time::OffsetDateTime::parse(input, &Rfc3339)
            .map_err(ParseError::Parse)?;
        Self::try_from(parsed).map_err(ParseError::ComponentRange)
    }

    /// Formats this [`DateTime`] as a [RFC 3339] string.
    ///
    /// Years beyond the [RFC 3339] range fall back to an ISO 8601-like form.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.inner.to_string())
    }

    /// Reinterprets this [`DateTime`] as marking another event.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Converts the provided date and time to UTC and drops its sub-microsecond
/// part.
fn truncate(
    dt: time::OffsetDateTime,
) -> Result<time::OffsetDateTime, time::error::ComponentRange> {
    let utc = dt.to_offset(UtcOffset::UTC);
    utc.replace_nanosecond(utc.nanosecond() / 1_000 * 1_000)
}

/// Error of parsing a [`DateTime`] out of a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Input is not a [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[display("malformed RFC 3339 date and time: {_0}")]
    Parse(time::error::Parse),

    /// Input is out of the supported range.
    #[display("date and time out of range: {_0}")]
    ComponentRange(time::error::ComponentRange),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> TryFrom<time::OffsetDateTime> for DateTimeOf<Of> {
    type Error = time::error::ComponentRange;

    fn try_from(dt: time::OffsetDateTime) -> Result<Self, Self::Error> {
        Ok(Self {
            inner: truncate(dt)?,
            _of: PhantomData,
        })
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for time::OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> FromSql<'_> for DateTimeOf<Of> {
    accepts!(TIMESTAMPTZ);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::OffsetDateTime::from_sql(ty, raw)?
            .try_into()
            .map_err(Box::from)
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> ToSql for DateTimeOf<Of> {
    accepts!(TIMESTAMPTZ);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.inner.to_sql(ty, w)
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Date and time in a [RFC 3339] format with a microsecond precision.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[graphql_scalar(with = Self, parse_token(String))]
    type DateTime = crate::DateTime;

    impl DateTime {
        fn to_output<S: ScalarValue>(dt: &DateTime) -> Value<S> {
            Value::scalar(dt.to_rfc3339())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            let s = input.as_string_value().ok_or_else(|| {
                format!("Expected RFC 3339 string, found: {input}")
            })?;
            Self::from_rfc3339(s).map_err(|e| e.to_string())
        }
    }
}

#[cfg(test)]
mod spec {
    use super::DateTime;

    #[test]
    fn parses_rfc3339_into_utc() {
        let local = DateTime::from_rfc3339("2024-05-01T15:00:00+03:00").unwrap();
        let utc = DateTime::from_rfc3339("2024-05-01T12:00:00Z").unwrap();

        assert_eq!(local, utc);
        assert_eq!(utc.to_rfc3339(), "2024-05-01T12:00:00Z");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(DateTime::from_rfc3339("").is_err());
        assert!(DateTime::from_rfc3339("yesterday").is_err());
        assert!(DateTime::from_rfc3339("2024-13-01T00:00:00Z").is_err());
    }

    #[test]
    fn truncates_to_microseconds() {
        let dt =
            DateTime::from_rfc3339("2024-05-01T12:00:00.123456789Z").unwrap();

        assert_eq!(dt.to_rfc3339(), "2024-05-01T12:00:00.123456Z");
    }

    #[test]
    fn orders_chronologically() {
        let older = DateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let newer = DateTime::from_unix_timestamp(1_700_000_001).unwrap();

        assert!(older < newer);
        assert!(DateTime::now() > newer);
    }
}
