// ⚙️ Configuration - backend location and logo knobs
//
// Every setting is a CLI flag with an environment fallback, so the binary
// runs unchanged next to a local backend or against a deployed one.

use clap::Args;
use std::time::Duration;

use crate::api::DashboardClient;
use crate::error::ApiResult;
use crate::logo::{HttpImageProbe, LogoPolicy, ProbeError};

/// Local backend started with its default settings.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct DashboardConfig {
    /// Base URL of the dashboard backend
    #[arg(long, env = "NORDIC_DASH_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Milliseconds one logo candidate may take before the next is tried
    #[arg(long, env = "NORDIC_DASH_LOGO_TIMEOUT_MS", default_value_t = 2000, global = true)]
    pub logo_timeout_ms: u64,

    /// Loaded logos narrower than this many pixels count as broken
    #[arg(long, env = "NORDIC_DASH_LOGO_MIN_WIDTH", default_value_t = 10, global = true)]
    pub logo_min_width: u32,

    /// Logos resolved at the same time
    #[arg(long, env = "NORDIC_DASH_LOGO_CONCURRENCY", default_value_t = 8, global = true)]
    pub logo_concurrency: usize,

    /// Seconds before a backend request is abandoned
    #[arg(long, env = "NORDIC_DASH_REQUEST_TIMEOUT", default_value_t = 10, global = true)]
    pub request_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            api_url: DEFAULT_API_URL.to_string(),
            logo_timeout_ms: 2000,
            logo_min_width: 10,
            logo_concurrency: 8,
            request_timeout_secs: 10,
        }
    }
}

impl DashboardConfig {
    pub fn logo_policy(&self) -> LogoPolicy {
        LogoPolicy {
            wait: Duration::from_millis(self.logo_timeout_ms),
            min_width: self.logo_min_width,
            ..LogoPolicy::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn client(&self) -> ApiResult<DashboardClient> {
        DashboardClient::new(&self.api_url, self.request_timeout())
    }

    /// Image loads share the logo wait as their hard request limit.
    pub fn image_probe(&self) -> Result<HttpImageProbe, ProbeError> {
        HttpImageProbe::new(Duration::from_millis(self.logo_timeout_ms))
    }
}
