//! Indexer definition types
//!
//! Definitions come from an external JSON document and are forwarded to the
//! target API untouched. The only thing we ever look at is the `fields`
//! array, to decide whether the captcha workflow applies. A malformed record
//! is still forwarded so the service rejects that indexer alone.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::domain::call::CallSite;

/// Field name that marks an indexer as needing a captcha check
pub const CAPTCHA_FIELD: &str = "cardigannCaptcha";

/// Errors raised while reading an indexer document
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Invalid indexer document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Indexer document must be a JSON array")]
    NotAnArray,
}

/// Which provisioning workflow a definition goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexerBranch {
    /// A single create call
    Direct,
    /// create, checkCaptcha, create
    Captcha,
}

impl IndexerBranch {
    /// Ordered calls issued for a definition on this branch
    ///
    /// The second create after `checkCaptcha` is part of the observed
    /// contract with the service and must not be collapsed.
    pub fn call_plan(&self) -> &'static [CallSite] {
        match self {
            IndexerBranch::Direct => &[CallSite::CreateIndexer],
            IndexerBranch::Captcha => &[
                CallSite::CreateIndexer,
                CallSite::CheckCaptcha,
                CallSite::CreateIndexer,
            ],
        }
    }
}

impl std::fmt::Display for IndexerBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexerBranch::Direct => write!(f, "direct"),
            IndexerBranch::Captcha => write!(f, "captcha"),
        }
    }
}

/// One indexer as supplied by the input document
#[derive(Debug, Clone, PartialEq)]
pub struct IndexerDefinition {
    name: Option<String>,
    label: String,
    payload: JsonValue,
}

impl IndexerDefinition {
    /// Wrap a raw JSON record
    ///
    /// Never fails: a record without a string `name` is labelled by its
    /// position, and one whose `fields` is not an array takes the direct
    /// branch.
    ///
    /// # Arguments
    /// * `index` - Position in the source document, for labelling
    /// * `value` - The record exactly as read
    pub fn from_value(index: usize, value: JsonValue) -> Self {
        let name = value
            .get("name")
            .and_then(JsonValue::as_str)
            .map(str::to_string);
        let label = name.clone().unwrap_or_else(|| format!("#{}", index));

        Self {
            name,
            label,
            payload: value,
        }
    }

    /// The `name` of the record, or `#<position>` when it has none
    pub fn name(&self) -> &str {
        &self.label
    }

    /// Whether the record is an object with a string `name` and, if
    /// present, an array of `fields`
    pub fn is_well_formed(&self) -> bool {
        self.payload.is_object()
            && self.name.is_some()
            && matches!(
                self.payload.get("fields"),
                None | Some(JsonValue::Array(_))
            )
    }

    /// The full record, sent as the request body
    pub fn payload(&self) -> &JsonValue {
        &self.payload
    }

    /// Names of all entries in `fields`, skipping entries without one
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.payload
            .get("fields")
            .and_then(JsonValue::as_array)
            .into_iter()
            .flatten()
            .filter_map(|field| field.get("name").and_then(JsonValue::as_str))
    }

    pub fn requires_captcha(&self) -> bool {
        self.field_names().any(|name| name == CAPTCHA_FIELD)
    }

    pub fn branch(&self) -> IndexerBranch {
        if self.requires_captcha() {
            IndexerBranch::Captcha
        } else {
            IndexerBranch::Direct
        }
    }
}

/// Parse an ordered JSON array of indexer definitions
pub fn parse_document(text: &str) -> Result<Vec<IndexerDefinition>, DefinitionError> {
    let value: JsonValue = serde_json::from_str(text)?;

    let JsonValue::Array(items) = value else {
        return Err(DefinitionError::NotAnArray);
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(index, item)| IndexerDefinition::from_value(index, item))
        .collect())
}
