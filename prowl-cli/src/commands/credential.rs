//! Credential command handler

use anyhow::Result;
use colored::*;
use prowl_setup::Config;
use prowl_setup::bootstrap::CredentialStore;

/// Reuse or generate the API key and print it
pub fn handle_credential(config: &Config, quiet: bool) -> Result<()> {
    let store = CredentialStore::new(&config.env_file, &config.api_key_var);
    let existed = store.load()?.is_some();
    let key = store.ensure()?;

    if quiet {
        println!("{}", key.as_str());
        return Ok(());
    }

    let state = if existed { "existing" } else { "generated" };
    println!(
        "{} {} ({}, {})",
        "✓".green().bold(),
        config.api_key_var.bold(),
        state,
        store.path().display()
    );
    println!("  {}", key.as_str());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_credential_is_generated_once() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            env_file: dir.path().join(".env"),
            ..Config::default()
        };

        handle_credential(&config, true).unwrap();
        let first = std::fs::read_to_string(&config.env_file).unwrap();
        assert!(first.starts_with("PROWLARR_API_KEY="));

        handle_credential(&config, false).unwrap();
        let second = std::fs::read_to_string(&config.env_file).unwrap();
        assert_eq!(first, second);
    }
}
