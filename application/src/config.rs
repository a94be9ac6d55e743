//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::{
    infra::postgres::{PoolConfig, Timeouts},
    read::property::Strictness,
};
use smart_default::SmartDefault;

/// Configuration of the marketplace server.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: Server,

    /// Browsing settings.
    pub browse: Browse,

    /// Postgres property store settings.
    pub postgres: Postgres,

    /// Logging settings.
    pub log: Log,
}

impl Config {
    /// Prefix of environment variables overriding the [`Config`] file, like
    /// `RENTALS.POSTGRES.HOST`.
    pub const ENV_PREFIX: &'static str = "RENTALS";

    /// Loads the [`Config`] from the file at the provided `path`, overridden
    /// by the [`Config::ENV_PREFIX`]ed environment variables.
    ///
    /// Missing file and missing fields fall back to defaults.
    ///
    /// # Errors
    ///
    /// If the file or some variable holds a malformed value.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        let file = config::File::with_name(path.as_ref()).required(false);
        let env = config::Environment::with_prefix(Self::ENV_PREFIX)
            .separator(".");

        ConfigBuilder::<DefaultState>::default()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

/// HTTP server settings.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Address to listen on.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to listen on.
    #[default(8080)]
    pub port: u16,

    /// [CORS] settings.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] settings.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// Origins allowed to call the APIs from browsers, `*` allowing any.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Browsing settings.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Browse {
    /// Whether malformed browse parameters are rejected instead of being
    /// ignored.
    pub strict_params: bool,
}

impl From<Browse> for Strictness {
    fn from(value: Browse) -> Self {
        if value.strict_params {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// Postgres property store settings.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host of the Postgres server.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port of the Postgres server.
    #[default(5432)]
    pub port: u16,

    /// Role to log in as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password of the [`Postgres::user`].
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database holding the `properties` table.
    #[default("rentals".to_owned())]
    pub dbname: String,

    /// Maximum number of pooled connections.
    #[default(16)]
    pub max_connections: usize,

    /// Time to wait for a pooled connection before failing.
    #[default(time::Duration::from_secs(5))]
    #[serde(with = "humantime_serde")]
    pub wait_timeout: time::Duration,
}

impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
            max_connections,
            wait_timeout,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            pool: Some(PoolConfig {
                max_size: max_connections,
                timeouts: Timeouts::wait_millis(
                    u64::try_from(wait_timeout.as_millis()).unwrap_or(u64::MAX),
                ),
                ..PoolConfig::default()
            }),
            ..Self::default()
        }
    }
}

/// Logging settings.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Maximum verbosity of the written logs.
    pub level: LogLevel,
}

/// Verbosity of logs, from the most verbose to the least.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including every SQL statement outcome.
    #[serde(alias = "TRACE")]
    Trace,

    /// Diagnostics, such as browse statistics and ignored parameters.
    #[serde(alias = "DEBUG")]
    Debug,

    /// Lifecycle events and served requests.
    #[default]
    #[serde(alias = "INFO")]
    Info,

    /// Rejected requests and recoverable failures.
    #[serde(alias = "WARN")]
    Warn,

    /// Failed requests only.
    #[serde(alias = "ERROR")]
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use service::read::property::Strictness;

    use super::Config;

    #[test]
    fn defaults_to_lenient_browsing() {
        let config = Config::default();

        assert_eq!(Strictness::from(config.browse), Strictness::Lenient);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.postgres.wait_timeout.as_secs(), 5);
    }

    #[test]
    fn converts_postgres_pool_settings() {
        let config = Config::default();

        let pg = service::infra::postgres::Config::from(config.postgres);

        let pool = pg.pool.unwrap();
        assert_eq!(pool.max_size, 16);
        assert_eq!(
            pool.timeouts.wait,
            Some(std::time::Duration::from_secs(5)),
        );
        assert_eq!(pg.dbname.as_deref(), Some("rentals"));
    }
}
