//! Configuration module
//!
//! Global flags shared by every subcommand. Each flag falls back to the same
//! `PROWL_*` variable the container entrypoint reads, and both go through
//! [`Config::from_lookup`] so defaults and empty values behave identically.

use anyhow::Result;
use clap::Args;
use prowl_setup::Config;

/// Settings for the target API and the input files
///
/// Unset flags take the defaults of [`Config`].
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Base URL of the target API [default: http://localhost:9696/api/v1]
    #[arg(long, global = true, env = "PROWL_TARGET_URL")]
    pub target_url: Option<String>,

    /// Env file holding the API key [default: .env]
    #[arg(long, global = true, env = "PROWL_ENV_FILE")]
    pub env_file: Option<String>,

    /// Name of the API key variable in the env file [default: PROWLARR_API_KEY]
    #[arg(long, global = true, env = "PROWL_API_KEY_VAR")]
    pub api_key_var: Option<String>,

    /// JSON array of indexer definitions [default: indexers.json]
    #[arg(long, global = true, env = "PROWL_INDEXERS_FILE")]
    pub indexers_file: Option<String>,

    /// Proxy template file [default: proxy.json]
    #[arg(long, global = true, env = "PROWL_PROXY_TEMPLATE")]
    pub proxy_template: Option<String>,

    /// Value for ${FLARESOLVERR_HOST} in the proxy template [default: http://flaresolverr:8191/]
    #[arg(long, global = true, env = "PROWL_FLARESOLVERR_HOST")]
    pub flaresolverr_host: Option<String>,

    /// Label of the tag created before the proxy [default: flaresolverr]
    #[arg(long, global = true, env = "PROWL_TAG_LABEL")]
    pub tag_label: Option<String>,

    /// Seconds between readiness probes [default: 5]
    #[arg(long, global = true, env = "PROWL_POLL_INTERVAL")]
    pub poll_interval: Option<String>,

    /// Seconds to wait for readiness, 0 for no limit [default: 300]
    #[arg(long, global = true, env = "PROWL_READY_TIMEOUT")]
    pub ready_timeout: Option<String>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long, global = true, env = "PROWL_REQUEST_TIMEOUT")]
    pub request_timeout: Option<String>,

    /// Data directory whose persisted state is wiped before setup
    #[arg(long, global = true, env = "PROWL_STATE_DIR")]
    pub state_dir: Option<String>,
}

impl ConfigArgs {
    /// Build and check the setup configuration
    pub fn to_config(&self) -> Result<Config> {
        let config = Config::from_lookup(|name| self.lookup(name))?;
        config.validate()?;
        Ok(config)
    }

    /// Value given for a `PROWL_*` variable, by flag or environment
    fn lookup(&self, name: &str) -> Option<String> {
        let value = match name {
            "PROWL_TARGET_URL" => &self.target_url,
            "PROWL_ENV_FILE" => &self.env_file,
            "PROWL_API_KEY_VAR" => &self.api_key_var,
            "PROWL_INDEXERS_FILE" => &self.indexers_file,
            "PROWL_PROXY_TEMPLATE" => &self.proxy_template,
            "PROWL_FLARESOLVERR_HOST" => &self.flaresolverr_host,
            "PROWL_TAG_LABEL" => &self.tag_label,
            "PROWL_POLL_INTERVAL" => &self.poll_interval,
            "PROWL_READY_TIMEOUT" => &self.ready_timeout,
            "PROWL_REQUEST_TIMEOUT" => &self.request_timeout,
            "PROWL_STATE_DIR" => &self.state_dir,
            _ => return None,
        };
        value.clone()
    }
}
