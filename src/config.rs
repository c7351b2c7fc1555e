//! Configuration module for spotlight-feed.

use serde::Deserialize;
use std::path::Path;

use crate::{FeedError, Result};

/// Default spotlight events endpoint.
pub const DEFAULT_API_URL: &str = "https://gamefound.com/api/platformEvents/getSpotlightPlatformEvents?eventCount=15&olderThanEventId=&excludeDemotedProjects=true";

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// URL of the JSON events endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Maximum accepted response body size in bytes.
    #[serde(default = "default_max_payload")]
    pub max_payload_bytes: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_max_payload() -> u64 {
    5 * 1024 * 1024 // 5MB
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            max_payload_bytes: default_max_payload(),
        }
    }
}

/// Channel-level feed metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Channel title.
    #[serde(default = "default_feed_title")]
    pub title: String,
    /// Channel link. Empty means the upstream API URL.
    #[serde(default)]
    pub link: String,
    /// Channel description.
    #[serde(default = "default_feed_description")]
    pub description: String,
    /// Origin that relative item links are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_feed_title() -> String {
    "Gamefound Spotlight (unofficial)".to_string()
}

fn default_feed_description() -> String {
    "RSS feed generated from Gamefound Spotlight API".to_string()
}

fn default_base_url() -> String {
    "https://gamefound.com".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: default_feed_title(),
            link: String::new(),
            description: default_feed_description(),
            base_url: default_base_url(),
        }
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the RSS file to write.
    #[serde(default = "default_output_path")]
    pub path: String,
}

fn default_output_path() -> String {
    "dist/gamefound_spotlight.xml".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

/// Trigger service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// Shared secret the scheduler must present (must be set to serve).
    #[serde(default)]
    pub cron_token: String,
    /// Whether to serve the generated artifact at `/feed.xml`.
    #[serde(default = "default_serve_feed")]
    pub serve_feed: bool,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    10000
}

fn default_serve_feed() -> bool {
    true
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cron_token: String::new(),
            serve_feed: default_serve_feed(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file; console only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Upstream API configuration.
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Channel metadata.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Output artifact configuration.
    #[serde(default)]
    pub output: OutputConfig,
    /// Trigger service configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FeedError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration for the CLI.
    ///
    /// A missing file means defaults; any other read or parse failure is an
    /// error. Environment overrides are applied in both cases.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::load_with_env(path) {
            Err(FeedError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                let mut config = Self::default();
                config.apply_env_overrides();
                Ok(config)
            }
            result => result,
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| FeedError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `SPOTLIGHT_API_URL`, `SPOTLIGHT_OUTPUT_PATH`, `SPOTLIGHT_BASE_URL`
    /// - `SPOTLIGHT_FEED_TITLE`, `SPOTLIGHT_FEED_LINK`, `SPOTLIGHT_FEED_DESCRIPTION`
    /// - `SPOTLIGHT_LOG_LEVEL`
    /// - `CRON_TOKEN`: shared secret for the run trigger
    /// - `PORT`: listen port
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = var("SPOTLIGHT_API_URL") {
            self.upstream.api_url = v;
        }
        if let Some(v) = var("SPOTLIGHT_OUTPUT_PATH") {
            self.output.path = v;
        }
        if let Some(v) = var("SPOTLIGHT_BASE_URL") {
            self.feed.base_url = v;
        }
        if let Some(v) = var("SPOTLIGHT_FEED_TITLE") {
            self.feed.title = v;
        }
        if let Some(v) = var("SPOTLIGHT_FEED_LINK") {
            self.feed.link = v;
        }
        if let Some(v) = var("SPOTLIGHT_FEED_DESCRIPTION") {
            self.feed.description = v;
        }
        if let Some(v) = var("SPOTLIGHT_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = var("CRON_TOKEN") {
            self.web.cron_token = v;
        }
        if let Some(v) = var("PORT") {
            match v.parse() {
                Ok(port) => self.web.port = port,
                Err(_) => eprintln!("Ignoring invalid PORT value: {v}"),
            }
        }
    }

    /// Channel link, falling back to the upstream API URL.
    pub fn channel_link(&self) -> &str {
        if self.feed.link.is_empty() {
            &self.upstream.api_url
        } else {
            &self.feed.link
        }
    }

    /// Validate the settings the pipeline depends on.
    ///
    /// Returns an error if:
    /// - `upstream.api_url` or `feed.base_url` is not an absolute http(s) URL
    /// - `output.path` is empty
    pub fn validate(&self) -> Result<()> {
        check_http_url("upstream.api_url", &self.upstream.api_url)?;
        check_http_url("feed.base_url", &self.feed.base_url)?;
        if self.output.path.trim().is_empty() {
            return Err(FeedError::Config("output.path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Validate the configuration for running the trigger service.
    ///
    /// In addition to [`Config::validate`], a cron token must be set.
    pub fn validate_for_serve(&self) -> Result<()> {
        self.validate()?;
        if self.web.cron_token.is_empty() {
            return Err(FeedError::Config(
                "cron_token is not set. \
                 Set it in config.toml or via CRON_TOKEN environment variable."
                    .to_string(),
            ));
        }
        Ok(())
    }
}

fn check_http_url(name: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| FeedError::Config(format!("{name} is not a valid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(FeedError::Config(format!(
            "{name} has unsupported scheme: {scheme}"
        ))),
    }
}
