//! Helpers for defining GraphQL scalars on top of domain types.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    InputValue, ParseScalarResult, ParseScalarValue, ScalarToken, ScalarValue,
    Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute of newtypes
/// wrapping a domain type `D`.
///
/// GraphQL scalar is represented as a string: [`Display`] of `D` on output,
/// and [`FromStr`] of `D` on input, so the domain validation applies to the
/// incoming values as is.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<D>(PhantomData<D>);

impl<D> Via<D> {
    /// Renders the `scalar` as a string [`Value`].
    pub fn to_output<T, S>(scalar: &T) -> Value<S>
    where
        D: fmt::Display,
        T: AsRef<D>,
        S: ScalarValue,
    {
        Value::scalar(scalar.as_ref().to_string())
    }

    /// Parses the `scalar` out of a string [`InputValue`].
    ///
    /// # Errors
    ///
    /// If the [`InputValue`] is not a string, or is rejected by the domain
    /// validation of `D`.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        D: FromStr,
        D::Err: fmt::Display,
        T: From<D>,
        S: ScalarValue,
    {
        input
            .as_string_value()
            .ok_or_else(|| format!("Expected a string, found: {input}"))?
            .parse::<D>()
            .map(T::from)
            .map_err(|e| e.to_string())
    }

    /// Parses the provided string [`ScalarToken`].
    ///
    /// # Errors
    ///
    /// If the [`ScalarToken`] is not a string.
    pub fn parse_token<S: ScalarValue>(
        token: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(token)
    }
}

#[cfg(test)]
mod spec {
    use juniper::{graphql_input_value, DefaultScalarValue, InputValue};
    use service::domain::property::Title;

    use crate::api::property;

    use super::Via;

    #[test]
    fn parses_with_domain_validation() {
        let ok: InputValue<DefaultScalarValue> =
            graphql_input_value!("Nyumba ya vyumba viwili");
        let parse = Via::<Title>::from_input::<property::Title, _>;

        let title = parse(&ok).unwrap();
        assert_eq!(title.to_string(), "Nyumba ya vyumba viwili");

        let blank: InputValue<DefaultScalarValue> = graphql_input_value!("  ");
        assert_eq!(parse(&blank).unwrap_err(), "invalid `Title`");

        let number: InputValue<DefaultScalarValue> = graphql_input_value!(42);
        let err = parse(&number).unwrap_err();
        assert!(err.starts_with("Expected a string"), "{err}");
    }
}
