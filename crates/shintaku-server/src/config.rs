//! Gateway Configuration
//!
//! All knobs come from environment variables so deploys stay
//! twelve-factor. Missing credentials do not abort startup; the
//! generate route reports a configuration error instead, which keeps
//! health checks and Swagger usable on a misconfigured box.

use std::time::Duration;

/// Runtime configuration for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Upstream credential. `None` means the service boots but every
    /// generation request fails with a configuration error.
    pub gemini_api_key: Option<String>,
    /// Upstream model identifier.
    pub gemini_model: String,
    /// Origins allowed to call the API with credentials.
    pub allowed_origins: Vec<String>,
    /// Development mode relaxes CORS to any origin.
    pub dev_mode: bool,
    /// Address to bind.
    pub bind_addr: String,
    /// Requests allowed per client per window.
    pub rate_limit_max_requests: u32,
    /// Sliding-window length.
    pub rate_limit_window: Duration,
    /// Violations inside the window before a ban.
    pub rate_limit_max_violations: u32,
    /// Ban length once violations are exhausted.
    pub rate_limit_ban: Duration,
}

const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://goddess-oracle.vercel.app",
    "http://localhost:5173",
    "http://localhost:4173",
];

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: "gemini-flash-latest".to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            dev_mode: false,
            bind_addr: "0.0.0.0:8080".to_string(),
            rate_limit_max_requests: 20,
            rate_limit_window: Duration::from_secs(60 * 60),
            rate_limit_max_violations: 3,
            rate_limit_ban: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the environment, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.allowed_origins);

        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            allowed_origins,
            dev_mode: std::env::var("DEV_MODE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            rate_limit_max_requests: env_u32("RATE_LIMIT_MAX_REQUESTS")
                .unwrap_or(defaults.rate_limit_max_requests),
            rate_limit_window: env_u64("RATE_LIMIT_WINDOW_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.rate_limit_window),
            rate_limit_max_violations: env_u32("RATE_LIMIT_MAX_VIOLATIONS")
                .unwrap_or(defaults.rate_limit_max_violations),
            rate_limit_ban: env_u64("RATE_LIMIT_BAN_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.rate_limit_ban),
        }
    }

    /// Whether `origin` may call the API.
    pub fn origin_allowed(&self, origin: &str) -> bool {
        self.dev_mode || self.allowed_origins.iter().any(|o| o == origin)
    }
}

fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
