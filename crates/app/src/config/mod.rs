//! Client configuration

use clap::Args;

use crate::config::{api::ApiConfig, catalog::CatalogConfig, logging::LoggingConfig};

pub mod api;
pub mod catalog;
pub mod logging;

pub use logging::LogFormat;

/// Medstore client configuration, read from flags and the environment.
#[derive(Debug, Args)]
pub struct Config {
    /// Backend connection settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Catalog presentation settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn flags_override_defaults() -> TestResult {
        let harness = Harness::try_parse_from([
            "medstore",
            "--api-url",
            "https://admin.example.com/api/",
            "--excluded-categories",
            "SPO2,Spares",
            "--log-format",
            "json",
            "--timeout-seconds",
            "5",
        ])?;

        let config = harness.config;

        assert_eq!(config.api.api_url, "https://admin.example.com/api/");
        assert_eq!(config.api.timeout().as_secs(), 5);
        assert_eq!(config.catalog.excluded_categories, ["SPO2", "Spares"]);
        assert!(matches!(config.logging.log_format, LogFormat::Json));

        Ok(())
    }
}
