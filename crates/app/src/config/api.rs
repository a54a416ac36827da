//! Backend API Config

use std::time::Duration;

use clap::Args;
use zeroize::Zeroizing;

/// Backend connection settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL of the catalog API
    #[arg(long, env = "MEDSTORE_API_URL", default_value = "http://localhost:8000/api")]
    pub api_url: String,

    /// Bearer token for admin endpoints
    #[arg(long, env = "MEDSTORE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long,
        env = "MEDSTORE_API_TIMEOUT_SECONDS",
        default_value_t = 30u64
    )]
    pub timeout_seconds: u64,
}

impl ApiConfig {
    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The token, wiped from memory on drop.
    #[must_use]
    pub fn token(&self) -> Option<Zeroizing<String>> {
        self.api_token.clone().map(Zeroizing::new)
    }
}
