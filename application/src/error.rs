//! [`Error`]-related definitions.

use std::{fmt, num::TryFromIntError};

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use derive_more::Error as StdError;
use itertools::Itertools as _;
use juniper::IntoFieldError;
use serde::Serialize;
use service::{infra::database, read::property::ValidationError};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// GraphQL API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Creates a new [`Error`] representing an invalid client input.
    #[must_use]
    pub fn bad_request(code: Code, msg: &impl ToString) -> Self {
        Self {
            code,
            status_code: http::StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Indicates whether the failed operation may succeed if retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.status_code == http::StatusCode::SERVICE_UNAVAILABLE
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

impl<S> IntoFieldError<S> for Error
where
    S: From<String> + From<bool>,
{
    fn into_field_error(self) -> juniper::FieldError<S> {
        let mut ext = juniper::Object::with_capacity(3);
        drop(
            ext.add_field("code", juniper::Value::scalar(self.code.to_owned())),
        );
        if self.is_retryable() {
            drop(ext.add_field(
                "retryable",
                juniper::Value::scalar(true),
            ));
        }
        drop(
            ext.add_field(
                "backtrace",
                juniper::Value::list(
                    self.backtrace
                        .iter()
                        .flat_map(|trace| trace.iter())
                        .map(|frame| juniper::Value::scalar(frame.to_string()))
                        .collect(),
                ),
            ),
        );
        juniper::FieldError::new(self.message, juniper::Value::object(ext))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        /// JSON body of a failed REST response.
        #[derive(Serialize)]
        struct Body {
            /// [`Error`] code.
            code: Code,

            /// [`Error`] message.
            message: String,

            /// Indicator whether the request may be retried.
            retryable: bool,
        }

        let retryable = self.is_retryable();
        (
            self.status_code,
            Json(Body {
                code: self.code,
                message: self.message,
                retryable,
            }),
        )
            .into_response()
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        self.is_unavailable().then(|| Error {
            code: "PROPERTY_STORE_UNAVAILABLE",
            status_code: http::StatusCode::SERVICE_UNAVAILABLE,
            message: "Property store is unavailable, try again later".into(),
            backtrace: None,
        })
    }
}

impl AsError for ValidationError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error::bad_request("INVALID_BROWSE_PARAMS", self))
    }
}

impl AsError for TryFromIntError {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, IntoFieldError};
    use service::{
        infra::{database, postgres},
        read::property::ValidationError,
    };

    use super::{AsError as _, Error};

    #[test]
    fn validation_error_is_bad_request() {
        let err = ValidationError::UnknownSortKey {
            value: "cheapest".into(),
        }
        .as_error();

        assert_eq!(err.code, "INVALID_BROWSE_PARAMS");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
        assert!(err.message.contains("cheapest"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn unavailable_store_is_retryable() {
        let err = Error {
            code: "PROPERTY_STORE_UNAVAILABLE",
            status_code: http::StatusCode::SERVICE_UNAVAILABLE,
            message: "down".into(),
            backtrace: None,
        };

        let field = IntoFieldError::<DefaultScalarValue>::into_field_error(err);

        let ext = field.extensions().as_object_value().unwrap();
        assert_eq!(
            ext.get_field_value("code").unwrap().as_string_value(),
            Some("PROPERTY_STORE_UNAVAILABLE"),
        );
        assert_eq!(
            ext.get_field_value("retryable"),
            Some(&juniper::Value::scalar(true)),
        );
    }

    #[test]
    fn malformed_row_is_internal() {
        let err = database::Error::from(postgres::Error::MalformedRow {
            table: "properties",
            reason: "`views` out of range: -1".into(),
        })
        .as_error();

        assert_eq!(err.status_code, http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_retryable());
    }

    #[test]
    fn internal_error_is_not_retryable() {
        let err = Error::internal(&"boom");

        assert_eq!(err.code, "INTERNAL_SERVER_ERROR");
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "[INTERNAL_SERVER_ERROR]: boom");
    }
}
