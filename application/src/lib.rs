//! Application provides GraphQL and REST APIs of the rental marketplace
//! [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod browse;
pub mod config;
mod context;
pub mod error;

use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    Extension, Json,
};
use derive_more::Debug;
use juniper::{
    http::{self as gql, GraphQLBatchResponse},
    DefaultScalarValue, IntoFieldError as _,
};
use juniper_axum::extract::JuniperRequest;
// Used in binary.
use axum_client_ip as _;
use futures as _;
use refinery as _;
use tokio as _;
use tower_http as _;
use tracing_subscriber as _;

pub use self::{
    args::Args,
    browse::browse,
    config::Config,
    context::Context,
    error::{AsError, Error},
};

/// [`Service`] backed by the Postgres property store.
///
/// [`Service`]: service::Service
pub type Service = service::Service<service::infra::Postgres>;

/// Response of the [`graphql()`] endpoint.
///
/// Failed GraphQL executions are answered with the [`http::StatusCode`] of
/// the last [`Error`] raised while resolving them.
#[derive(Debug)]
pub struct GraphQLResponse {
    /// [`http::StatusCode`] to answer with if the execution failed.
    pub status_code: http::StatusCode,

    /// Result of the GraphQL execution.
    #[debug(skip)]
    pub body: GraphQLBatchResponse<DefaultScalarValue>,
}

impl GraphQLResponse {
    /// Creates a [`GraphQLResponse`] rejecting the request with the provided
    /// [`Error`] before any execution happens.
    #[must_use]
    pub fn rejected(err: Error) -> Self {
        Self {
            status_code: err.status_code,
            body: GraphQLBatchResponse::Single(gql::GraphQLResponse::error(
                err.into_field_error(),
            )),
        }
    }
}

impl IntoResponse for GraphQLResponse {
    fn into_response(self) -> Response {
        if self.body.is_ok() {
            Json(self.body).into_response()
        } else {
            (self.status_code, Json(self.body)).into_response()
        }
    }
}

/// GraphQL API endpoint, serving both queries and mutations.
#[tracing::instrument(skip_all, fields(otel.name = "GraphQL request"))]
pub async fn graphql(
    Extension(schema): Extension<Arc<api::Schema>>,
    ctx: Context,
    JuniperRequest(req): JuniperRequest,
) -> GraphQLResponse {
    let body = req.execute(&*schema, &ctx).await;
    if !body.is_ok() {
        tracing::debug!(status = %ctx.error_status_code(), "GraphQL failed");
    }
    GraphQLResponse {
        status_code: ctx.error_status_code(),
        body,
    }
}
