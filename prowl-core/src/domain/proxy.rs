//! Proxy template types
//!
//! The proxy document is kept as text with `${KEY}` placeholders and only
//! becomes JSON once every placeholder has been filled in.

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use thiserror::Error;

/// Placeholder for the captcha-solver host
pub const HOST_PLACEHOLDER: &str = "FLARESOLVERR_HOST";

/// Placeholder for the id of the tag created earlier in the run
pub const TAG_ID_PLACEHOLDER: &str = "TAG_ID";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Unresolved placeholders in proxy template: {}", .0.join(", "))]
    Unresolved(Vec<String>),

    #[error("Proxy template is not valid JSON after substitution: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Raw proxy template text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTemplate {
    text: String,
}

impl ProxyTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Split the text into literal runs and `${KEY}` placeholders
    ///
    /// An unterminated `${` is kept as literal text.
    fn segments(&self) -> Vec<Segment<'_>> {
        let mut segments = Vec::new();
        let mut rest = self.text.as_str();
        while let Some(start) = rest.find("${") {
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                break;
            };
            segments.push(Segment::Literal(&rest[..start]));
            segments.push(Segment::Placeholder(&after[..end]));
            rest = &after[end + 1..];
        }
        segments.push(Segment::Literal(rest));
        segments
    }

    /// Names of all `${KEY}` placeholders, in order of appearance
    pub fn placeholders(&self) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for segment in self.segments() {
            if let Segment::Placeholder(key) = segment {
                if !found.iter().any(|k| k == key) {
                    found.push(key.to_string());
                }
            }
        }
        found
    }

    /// Substitute placeholders and parse the result
    ///
    /// Every placeholder in the template must have a value in
    /// `substitutions`; extra substitutions are ignored.
    pub fn render(
        &self,
        substitutions: &HashMap<String, String>,
    ) -> Result<ProxyDefinition, TemplateError> {
        let unresolved: Vec<String> = self
            .placeholders()
            .into_iter()
            .filter(|key| !substitutions.contains_key(key))
            .collect();
        if !unresolved.is_empty() {
            return Err(TemplateError::Unresolved(unresolved));
        }

        // Single pass: substituted values are never scanned again
        let mut text = String::with_capacity(self.text.len());
        for segment in self.segments() {
            match segment {
                Segment::Literal(literal) => text.push_str(literal),
                Segment::Placeholder(key) => {
                    if let Some(value) = substitutions.get(key) {
                        text.push_str(value);
                    }
                }
            }
        }

        let payload = serde_json::from_str(&text)?;
        Ok(ProxyDefinition { payload })
    }
}

/// Proxy record ready to be posted
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyDefinition {
    payload: JsonValue,
}

impl ProxyDefinition {
    pub fn payload(&self) -> &JsonValue {
        &self.payload
    }

    pub fn name(&self) -> Option<&str> {
        self.payload.get("name").and_then(JsonValue::as_str)
    }
}
