use std::{
    future::IntoFuture as _,
    io,
    sync::{Arc, OnceLock},
    time,
};

use application::{api, browse, config, graphql, Args, Config};
use axum::{
    body::Body,
    extract::MatchedPath,
    routing::{get, on, MethodFilter},
    Extension, Router,
};
use axum_client_ip::InsecureClientIp;
use futures::TryFutureExt as _;
use service::{
    infra::{postgres, Postgres},
    read::property::Strictness,
    Service,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

/// [`log::Level`]s written to `stderr` instead of `stdout`.
const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

/// Maximum [`log::Level`] set once the [`Config`] is loaded.
static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

postgres::embed_migrations!("../migrations");

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || is_logged(meta.level(), false)
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || is_logged(meta.level(), true)
                })),
        )
        .init();

    _ = run().await;
}

/// Checks whether an event of the provided [`log::Level`] is written to
/// `stderr` (or `stdout` otherwise).
fn is_logged(level: &log::Level, to_stderr: bool) -> bool {
    let max = LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO);
    STDERR_LEVELS.contains(level) == to_stderr && max >= *level
}

/// Loads the [`Config`], migrates the property store and serves HTTP until
/// a shutdown signal arrives.
async fn run() -> Result<(), ()> {
    let Args {
        config,
        strict_params,
    } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        server,
        browse: browse_conf,
        postgres,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let mut store = Postgres::new(&postgres.into()).map_err(|e| {
        log::error!("failed to initialize `Postgres` property store: {e}");
    })?;
    let report = migrations::runner()
        .run_async(&mut store)
        .await
        .map_err(|e| {
            log::error!("failed to run property store migrations: {e}");
        })?;
    log::info!(
        "applied {} property store migration(s)",
        report.applied_migrations().len(),
    );

    let strictness = if strict_params {
        Strictness::Strict
    } else {
        Strictness::from(browse_conf)
    };
    log::info!("browse parameters are parsed in {strictness:?} mode");

    let app = Router::new()
        .route(
            "/graphql",
            on(MethodFilter::GET.or(MethodFilter::POST), graphql),
        )
        .route("/browse", get(browse))
        .layer(Extension(Arc::new(api::schema())))
        .layer(Extension(Service::new(store)))
        .layer(Extension(strictness))
        .layer(cors(server.cors)?)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(record_response),
        );

    let addr = (server.host.clone(), server.port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        log::error!("failed to listen on `{}:{}`: {e}", addr.0, addr.1);
    })?;
    log::info!("listening on `{}:{}`", addr.0, addr.1);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .into_future()
        .map_err(|e| log::error!("webserver failed: {e}"))
        .await
}

/// Builds a [`CorsLayer`] allowing the configured origins.
///
/// A `*` origin allows any origin.
fn cors(conf: config::Cors) -> Result<CorsLayer, ()> {
    let origins = if conf.origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        conf.origins
            .iter()
            .map(|origin| {
                origin.parse::<http::HeaderValue>().map_err(|e| {
                    log::error!("`{origin}` is not a valid CORS origin: {e}");
                })
            })
            .collect::<Result<Vec<_>, _>>()?
            .into()
    };

    Ok(CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::OPTIONS,
            http::Method::POST,
        ])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(origins))
}

/// Creates a [`tracing::Span`] for the incoming HTTP request.
fn request_span(req: &http::Request<Body>) -> tracing::Span {
    let client_ip = InsecureClientIp::from(req.headers(), req.extensions())
        .map(|ip| ip.0.to_string())
        .ok();

    tracing::info_span!(
        "HTTP request",
        http.client_ip = client_ip,
        http.method = req.method().as_str(),
        http.route = req
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str),
        http.target = req
            .uri()
            .path_and_query()
            .map(http::uri::PathAndQuery::as_str),
        http.user_agent = req
            .headers()
            .get(http::header::USER_AGENT)
            .and_then(|h| h.to_str().ok()),
        http.status_code = tracing::field::Empty,
    )
}

/// Records the outgoing HTTP response into the request [`tracing::Span`].
fn record_response(
    res: &http::Response<Body>,
    dur: time::Duration,
    span: &tracing::Span,
) {
    let status = res.status();
    _ = span.record("http.status_code", status.as_u16());

    let duration = format!("{}ms", dur.as_millis());
    if status.is_server_error() {
        log::error!(%duration, "request failed");
    } else if status.is_client_error() {
        log::warn!(%duration, "request rejected");
    } else {
        log::info!(%duration, "request served");
    }
}

/// Resolves once the process is asked to stop.
async fn shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                _ = s.recv().await;
            }
            Err(e) => {
                log::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    log::info!("shutting down gracefully");
}
