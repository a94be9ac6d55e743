//! [`Context`]-related definitions.

use std::sync::atomic::{self, AtomicU16};

use axum::{async_trait, extract::FromRequestParts};
use service::read::property::Strictness;

use crate::{Error, GraphQLResponse, Service};

/// Application context.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// [`Strictness`] of parsing browse criteria.
    strictness: Strictness,

    /// Error status code.
    error_status_code: AtomicU16,
}

impl Context {
    /// Creates a new [`Context`] around the provided [`Service`].
    #[must_use]
    pub fn new(service: Service, strictness: Strictness) -> Self {
        Self {
            service,
            strictness,
            error_status_code: AtomicU16::new(
                http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            ),
        }
    }

    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Returns [`Strictness`] of parsing browse criteria in this [`Context`].
    #[must_use]
    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Returns the [`http::StatusCode`] of the last [`Error`] raised in this
    /// [`Context`].
    #[must_use]
    pub fn error_status_code(&self) -> http::StatusCode {
        let code = self.error_status_code.load(atomic::Ordering::Relaxed);
        http::StatusCode::from_u16(code)
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Sets the error status code for this [`Context`].
    ///
    /// Provided [`http::StatusCode`] will be applied to the response.
    pub fn set_error_status_code(&self, status_code: http::StatusCode) {
        self.error_status_code
            .store(status_code.as_u16(), atomic::Ordering::Relaxed);
    }

    /// Helper method calling [`Context::set_error_status_code()`] inside
    /// [`Result::map_err()`] closure.
    pub fn error(&self) -> impl FnOnce(Error) -> Error + '_ {
        move |err| {
            self.set_error_status_code(err.status_code);
            err
        }
    }
}

impl juniper::Context for Context {}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = GraphQLResponse;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service = parts
            .extensions
            .get::<Service>()
            .cloned()
            .ok_or_else(|| {
                let err = Error::internal(&"missing `Service` extension");
                GraphQLResponse::rejected(err)
            })?;
        let strictness = parts
            .extensions
            .get::<Strictness>()
            .copied()
            .unwrap_or_default();

        Ok(Self::new(service, strictness))
    }
}
