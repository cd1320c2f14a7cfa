//! Feed configuration.

use edl_client::{RateLimitConfig, StoreClient};
use edl_core::{EdlError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::PAGE_SIZE;

/// Configuration for an EDL feed instance.
///
/// Field names follow the integration parameter spelling, so a parameter
/// dump can be loaded as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdlConfig {
    /// Listen port for the long-running HTTP listener.
    #[serde(rename = "longRunningPort", default)]
    pub long_running_port: Option<PortParam>,

    /// Output format (text, csv, json, json-seq).
    #[serde(default = "default_format")]
    pub format: String,

    /// Refresh only when a reader finds the cache empty or stale.
    #[serde(default)]
    pub on_demand: bool,

    /// Maximum number of indicators in the list.
    #[serde(default = "default_edl_size")]
    pub edl_size: usize,

    /// Store filter expression selecting the indicators to serve.
    #[serde(default)]
    pub indicators_query: String,

    /// How often the background timer rebuilds the list (e.g. "5 minutes").
    #[serde(default = "default_refresh_rate")]
    pub cache_refresh_rate: String,

    /// Indicators requested per store call.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Remote indicator store.
    #[serde(default)]
    pub store: Option<StoreConfig>,
}

/// A port given either as a number or as a string parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortParam {
    /// Numeric form (`longRunningPort = 8080`)
    Number(i64),
    /// String form (`longRunningPort = "8080"`)
    Text(String),
}

/// Connection settings for the remote indicator store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store base URL.
    pub base_url: String,

    /// API key sent as a bearer token.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Client-side request rate limit.
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,
}

/// Whether the cache is rebuilt by a timer or by readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// A background timer refreshes; readers never block.
    Scheduled,
    /// Readers refresh synchronously on a miss or forced refresh.
    OnDemand,
}

/// Validated settings for building and serving the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Store filter expression.
    pub query: String,
    /// Output format.
    pub format: OutputFormat,
    /// Maximum number of indicators.
    pub limit: usize,
    /// Refresh strategy.
    pub mode: CacheMode,
}

impl Default for EdlConfig {
    fn default() -> Self {
        Self {
            long_running_port: None,
            format: default_format(),
            on_demand: false,
            edl_size: default_edl_size(),
            indicators_query: String::new(),
            cache_refresh_rate: default_refresh_rate(),
            page_size: default_page_size(),
            store: None,
        }
    }
}

impl EdlConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from the default path, falling back to defaults.
    pub fn load_default() -> Result<Self> {
        default_config_path().map_or_else(|| Ok(Self::default()), |path| Self::load(&path))
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| EdlError::Config(e.to_string()))
    }

    /// The validated listen port.
    pub fn port(&self) -> Result<u16> {
        match &self.long_running_port {
            None => Err(EdlError::Config(String::from(
                "longRunningPort is required",
            ))),
            Some(PortParam::Number(n)) => parse_port(&n.to_string()),
            Some(PortParam::Text(s)) => parse_port(s),
        }
    }

    /// The validated output format.
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.format.parse()
    }

    /// The validated background refresh interval.
    pub fn refresh_interval(&self) -> Result<Duration> {
        parse_refresh_rate(&self.cache_refresh_rate)
    }

    /// Settings for the cache.
    pub fn cache_settings(&self) -> Result<CacheSettings> {
        Ok(CacheSettings {
            query: self.indicators_query.clone(),
            format: self.output_format()?,
            limit: self.edl_size,
            mode: if self.on_demand {
                CacheMode::OnDemand
            } else {
                CacheMode::Scheduled
            },
        })
    }

    /// Build the HTTP client for the configured store.
    pub fn store_client(&self) -> Result<StoreClient> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| EdlError::Config(String::from("missing [store] section")))?;

        let mut builder = StoreClient::builder(&store.base_url)
            .timeout(Duration::from_secs(store.timeout_secs))
            .rate_limit(
                RateLimitConfig::new()
                    .requests_per_second(store.requests_per_second)
                    .burst_size(store.requests_per_second),
            );
        if let Some(key) = &store.api_key {
            builder = builder.api_key(key);
        }
        builder.build()
    }

    /// Check every parameter, failing on the first invalid one.
    pub fn validate(&self) -> Result<()> {
        self.port()?;
        self.output_format()?;
        self.refresh_interval()?;
        if self.page_size == 0 {
            return Err(EdlError::Config(String::from("page_size must be positive")));
        }
        Ok(())
    }
}

/// Find the default config file path (`<config dir>/edl/edl.toml`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("edl").join("edl.toml"))
}

/// Parse a listen port parameter.
///
/// Empty, non-numeric and out-of-range values are configuration errors.
pub fn parse_port(raw: &str) -> Result<u16> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(EdlError::Config(String::from(
            "longRunningPort is required",
        )));
    }
    match raw.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(EdlError::Config(format!(
            "invalid longRunningPort '{raw}': must be a TCP port number"
        ))),
    }
}

/// Parse a refresh rate such as `"5 minutes"` or `"1 hour"`.
pub fn parse_refresh_rate(raw: &str) -> Result<Duration> {
    let invalid = || {
        EdlError::Config(format!(
            "invalid cache_refresh_rate '{raw}': expected '<number> <unit>', e.g. '5 minutes'"
        ))
    };

    let mut parts = raw.split_whitespace();
    let (Some(amount), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let amount: u64 = amount.parse().map_err(|_| invalid())?;
    if amount == 0 {
        return Err(invalid());
    }

    let unit_secs = match unit.to_lowercase().trim_end_matches('s') {
        "second" | "sec" => 1,
        "minute" | "min" => 60,
        "hour" => 3600,
        "day" => 86_400,
        "week" => 604_800,
        _ => return Err(invalid()),
    };

    amount
        .checked_mul(unit_secs)
        .map(Duration::from_secs)
        .ok_or_else(invalid)
}

// Default value functions for serde.
fn default_format() -> String {
    OutputFormat::Text.to_string()
}

const fn default_edl_size() -> usize {
    2500
}

fn default_refresh_rate() -> String {
    String::from("5 minutes")
}

const fn default_page_size() -> usize {
    PAGE_SIZE
}

const fn default_timeout() -> u64 {
    30
}

const fn default_rps() -> u32 {
    10
}
