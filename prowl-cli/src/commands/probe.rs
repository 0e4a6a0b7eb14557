//! Probe command handler

use anyhow::{Context, Result, bail};
use colored::*;
use prowl_client::TargetClient;
use prowl_setup::Config;
use prowl_setup::bootstrap::CredentialStore;

/// Send one health check with the stored key
pub async fn handle_probe(config: &Config) -> Result<()> {
    let store = CredentialStore::new(&config.env_file, &config.api_key_var);
    let Some(api_key) = store.load()? else {
        bail!(
            "No {} in {}; run `prowl credential` first",
            config.api_key_var,
            store.path().display()
        );
    };

    let client = TargetClient::with_timeout(&config.target_url, api_key, config.request_timeout)?;
    let checks = match client.check_health().await {
        Ok(checks) => checks,
        Err(e) if e.is_unauthorized() => bail!(
            "{} rejected the {} from {}",
            client.base_url(),
            config.api_key_var,
            store.path().display()
        ),
        Err(e) => {
            return Err(e).with_context(|| format!("{} is not ready", client.base_url()));
        }
    };

    println!("{} {}", "✓ Ready:".green().bold(), client.base_url());
    for check in checks {
        println!(
            "  {} {} {}",
            check.check_type.yellow(),
            check.source.dimmed(),
            check.message
        );
    }

    Ok(())
}
