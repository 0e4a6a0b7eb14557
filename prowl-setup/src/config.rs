//! Setup configuration
//!
//! Defines where the target API lives, where the inputs and the credential
//! are kept, and how long to wait for the service to come up.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SetupError};

/// Setup configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the target API (e.g., "http://localhost:9696/api/v1")
    pub target_url: String,

    /// Env file holding the API key
    pub env_file: PathBuf,

    /// Name of the API key variable inside `env_file`
    pub api_key_var: String,

    /// JSON array of indexer definitions
    pub indexers_file: PathBuf,

    /// Proxy template with `${FLARESOLVERR_HOST}` placeholder
    pub proxy_template_file: PathBuf,

    /// Host substituted into the proxy template
    pub flaresolverr_host: String,

    /// Label of the tag created before the proxy
    pub tag_label: String,

    /// Delay between readiness probes
    pub poll_interval: Duration,

    /// Upper bound on the readiness wait; `None` waits forever
    pub ready_timeout: Option<Duration>,

    /// Per-request timeout for calls to the target API
    pub request_timeout: Duration,

    /// Service data directory whose persisted state is wiped before setup
    pub state_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: "http://localhost:9696/api/v1".to_string(),
            env_file: PathBuf::from(".env"),
            api_key_var: "PROWLARR_API_KEY".to_string(),
            indexers_file: PathBuf::from("indexers.json"),
            proxy_template_file: PathBuf::from("proxy.json"),
            flaresolverr_host: "http://flaresolverr:8191/".to_string(),
            tag_label: "flaresolverr".to_string(),
            poll_interval: Duration::from_secs(5),
            ready_timeout: Some(Duration::from_secs(300)),
            request_timeout: Duration::from_secs(30),
            state_dir: None,
        }
    }
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Every variable is optional and falls back to [`Config::default`]:
    /// - PROWL_TARGET_URL
    /// - PROWL_ENV_FILE
    /// - PROWL_API_KEY_VAR
    /// - PROWL_INDEXERS_FILE
    /// - PROWL_PROXY_TEMPLATE
    /// - PROWL_FLARESOLVERR_HOST
    /// - PROWL_TAG_LABEL
    /// - PROWL_POLL_INTERVAL (seconds)
    /// - PROWL_READY_TIMEOUT (seconds, 0 = no limit)
    /// - PROWL_REQUEST_TIMEOUT (seconds)
    /// - PROWL_STATE_DIR
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] but reads variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let secs = |name: &str| -> Result<Option<u64>> {
            get(name)
                .map(|raw| {
                    raw.trim().parse::<u64>().map_err(|_| {
                        SetupError::Config(format!("{} must be a number of seconds, got {:?}", name, raw))
                    })
                })
                .transpose()
        };

        let ready_timeout = match secs("PROWL_READY_TIMEOUT")? {
            Some(0) => None,
            Some(n) => Some(Duration::from_secs(n)),
            None => defaults.ready_timeout,
        };

        Ok(Self {
            target_url: get("PROWL_TARGET_URL").unwrap_or(defaults.target_url),
            env_file: get("PROWL_ENV_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.env_file),
            api_key_var: get("PROWL_API_KEY_VAR").unwrap_or(defaults.api_key_var),
            indexers_file: get("PROWL_INDEXERS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.indexers_file),
            proxy_template_file: get("PROWL_PROXY_TEMPLATE")
                .map(PathBuf::from)
                .unwrap_or(defaults.proxy_template_file),
            flaresolverr_host: get("PROWL_FLARESOLVERR_HOST").unwrap_or(defaults.flaresolverr_host),
            tag_label: get("PROWL_TAG_LABEL").unwrap_or(defaults.tag_label),
            poll_interval: secs("PROWL_POLL_INTERVAL")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            ready_timeout,
            request_timeout: secs("PROWL_REQUEST_TIMEOUT")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            state_dir: get("PROWL_STATE_DIR").map(PathBuf::from),
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_url.starts_with("http://") && !self.target_url.starts_with("https://") {
            return Err(SetupError::Config(
                "target_url must start with http:// or https://".to_string(),
            ));
        }

        if self.api_key_var.is_empty() || self.api_key_var.contains(['=', ' ']) {
            return Err(SetupError::Config(format!(
                "api_key_var {:?} is not a valid variable name",
                self.api_key_var
            )));
        }

        if self.poll_interval.is_zero() {
            return Err(SetupError::Config(
                "poll_interval must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(SetupError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.tag_label.trim().is_empty() {
            return Err(SetupError::Config("tag_label cannot be empty".to_string()));
        }

        Ok(())
    }
}
