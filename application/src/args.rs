//! Command line [`Args`].

use clap::Parser;

/// Server of the rental property marketplace.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Rejects malformed browse parameters instead of ignoring them,
    /// regardless of the configuration file.
    #[arg(long)]
    pub strict_params: bool,
}

impl Args {
    /// Parses [`Args`] of the current process.
    ///
    /// # Errors
    ///
    /// If the arguments are malformed, or `--help`/`--version` is requested.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::Args;

    #[test]
    fn defaults_to_lenient_config_toml() {
        let args = Args::try_parse_from(["app"]).unwrap();

        assert_eq!(args.config, "config.toml");
        assert!(!args.strict_params);
    }

    #[test]
    fn forces_strict_params() {
        let args = Args::try_parse_from([
            "app",
            "--config",
            "prod.toml",
            "--strict-params",
        ])
        .unwrap();

        assert_eq!(args.config, "prod.toml");
        assert!(args.strict_params);
    }
}
