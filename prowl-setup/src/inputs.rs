//! Input documents
//!
//! Loads the indexer list and the proxy template up front so a broken input
//! stops the run before anything is sent to the target API.

use prowl_core::domain::indexer::{DefinitionError, IndexerDefinition, parse_document};
use prowl_core::domain::proxy::{HOST_PLACEHOLDER, ProxyTemplate, TAG_ID_PLACEHOLDER, TemplateError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Indexers {
        path: PathBuf,
        #[source]
        source: DefinitionError,
    },

    #[error("Proxy template uses unknown placeholders: {}", .0.join(", "))]
    UnknownPlaceholders(Vec<String>),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Everything the setup run pushes into the target API
#[derive(Debug, Clone)]
pub struct SetupInputs {
    pub definitions: Vec<IndexerDefinition>,
    pub proxy_template: ProxyTemplate,
    pub flaresolverr_host: String,
    pub tag_label: String,
}

impl SetupInputs {
    /// Read and check the documents named in `config`
    pub fn load(config: &Config) -> Result<Self, InputError> {
        let definitions = load_definitions(&config.indexers_file)?;
        let template_text = read(&config.proxy_template_file)?;

        let inputs = Self::new(
            definitions,
            ProxyTemplate::new(template_text),
            config.flaresolverr_host.clone(),
            config.tag_label.clone(),
        )?;

        info!(
            "Loaded {} indexer definition(s) from {}",
            inputs.definitions.len(),
            config.indexers_file.display()
        );

        Ok(inputs)
    }

    /// Assemble inputs, rejecting templates with placeholders we cannot fill
    pub fn new(
        definitions: Vec<IndexerDefinition>,
        proxy_template: ProxyTemplate,
        flaresolverr_host: impl Into<String>,
        tag_label: impl Into<String>,
    ) -> Result<Self, InputError> {
        let unknown: Vec<String> = proxy_template
            .placeholders()
            .into_iter()
            .filter(|key| key != HOST_PLACEHOLDER && key != TAG_ID_PLACEHOLDER)
            .collect();
        if !unknown.is_empty() {
            return Err(InputError::UnknownPlaceholders(unknown));
        }

        Ok(Self {
            definitions,
            proxy_template,
            flaresolverr_host: flaresolverr_host.into(),
            tag_label: tag_label.into(),
        })
    }
}

/// Read and parse an indexer document
pub fn load_definitions(path: &Path) -> Result<Vec<IndexerDefinition>, InputError> {
    let text = read(path)?;
    parse_document(&text).map_err(|source| InputError::Indexers {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}
