//! In-memory store
//!
//! Holds everything the stub API has been sent, plus the knobs that make it
//! misbehave on purpose.

use prowl_core::dto::tag::Tag;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Behaviour switches for the stub API
#[derive(Debug, Clone)]
pub struct MockOptions {
    /// Key expected in the `X-Api-Key` header
    pub api_key: String,
    /// Number of health probes answered with 503 before reporting healthy
    pub unhealthy_probes: u32,
    /// Indexer names whose creation is always rejected
    pub fail_indexers: HashSet<String>,
    /// Reject tag creation
    pub fail_tag: bool,
    /// Reject proxy registration
    pub fail_proxy: bool,
}

impl MockOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            unhealthy_probes: 0,
            fail_indexers: HashSet::new(),
            fail_tag: false,
            fail_proxy: false,
        }
    }
}

/// A request the stub API accepted past authentication
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub body: Option<JsonValue>,
}

#[derive(Debug, Default)]
struct Inner {
    health_probes: u32,
    next_id: i64,
    tags: Vec<Tag>,
    proxies: Vec<JsonValue>,
    indexers: Vec<JsonValue>,
    calls: Vec<RecordedCall>,
}

/// Shared state behind the router
#[derive(Debug)]
pub struct MockStore {
    options: MockOptions,
    inner: Mutex<Inner>,
}

/// Why an indexer was not stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexerRejection {
    MissingName,
    Duplicate(String),
    Configured(String),
}

impl MockStore {
    pub fn new(options: MockOptions) -> Self {
        Self {
            options,
            inner: Mutex::new(Inner {
                next_id: 1,
                ..Inner::default()
            }),
        }
    }

    pub fn options(&self) -> &MockOptions {
        &self.options
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record(&self, method: &str, path: &str, body: Option<JsonValue>) {
        self.lock().calls.push(RecordedCall {
            method: method.to_string(),
            path: path.to_string(),
            body,
        });
    }

    /// Count a health probe and report whether the service is up yet
    pub fn probe_health(&self) -> bool {
        let mut inner = self.lock();
        inner.health_probes += 1;
        inner.health_probes > self.options.unhealthy_probes
    }

    pub fn add_tag(&self, label: &str) -> Tag {
        let mut inner = self.lock();
        let tag = Tag {
            id: inner.next_id,
            label: label.to_string(),
        };
        inner.next_id += 1;
        inner.tags.push(tag.clone());
        tag
    }

    /// Store a proxy, returning it with its assigned id
    pub fn add_proxy(&self, mut proxy: JsonValue) -> JsonValue {
        let mut inner = self.lock();
        if let Some(object) = proxy.as_object_mut() {
            object.insert("id".to_string(), JsonValue::from(inner.next_id));
        }
        inner.next_id += 1;
        inner.proxies.push(proxy.clone());
        proxy
    }

    /// Store an indexer unless it is nameless, a duplicate, or configured to fail
    pub fn add_indexer(&self, mut indexer: JsonValue) -> Result<JsonValue, IndexerRejection> {
        let name = indexer
            .get("name")
            .and_then(JsonValue::as_str)
            .map(str::to_string)
            .ok_or(IndexerRejection::MissingName)?;

        if self.options.fail_indexers.contains(&name) {
            return Err(IndexerRejection::Configured(name));
        }

        let mut inner = self.lock();
        let exists = inner
            .indexers
            .iter()
            .any(|i| i.get("name").and_then(JsonValue::as_str) == Some(name.as_str()));
        if exists {
            return Err(IndexerRejection::Duplicate(name));
        }

        if let Some(object) = indexer.as_object_mut() {
            object.insert("id".to_string(), JsonValue::from(inner.next_id));
        }
        inner.next_id += 1;
        inner.indexers.push(indexer.clone());
        Ok(indexer)
    }

    pub fn indexers(&self) -> Vec<JsonValue> {
        self.lock().indexers.clone()
    }

    pub fn indexer_names(&self) -> Vec<String> {
        self.lock()
            .indexers
            .iter()
            .filter_map(|i| i.get("name").and_then(JsonValue::as_str))
            .map(str::to_string)
            .collect()
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.lock().tags.clone()
    }

    pub fn proxies(&self) -> Vec<JsonValue> {
        self.lock().proxies.clone()
    }

    pub fn health_probes(&self) -> u32 {
        self.lock().health_probes
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_turns_ready() {
        let store = MockStore::new(MockOptions {
            unhealthy_probes: 2,
            ..MockOptions::new("key")
        });
        assert!(!store.probe_health());
        assert!(!store.probe_health());
        assert!(store.probe_health());
        assert_eq!(store.health_probes(), 3);
    }

    #[test]
    fn test_indexer_duplicates_rejected() {
        let store = MockStore::new(MockOptions::new("key"));
        let first = store.add_indexer(json!({"name": "A", "fields": []})).unwrap();
        assert_eq!(first["id"], 1);

        assert_eq!(
            store.add_indexer(json!({"name": "A"})),
            Err(IndexerRejection::Duplicate("A".to_string()))
        );
        assert_eq!(
            store.add_indexer(json!({"fields": []})),
            Err(IndexerRejection::MissingName)
        );
        assert_eq!(store.indexer_names(), vec!["A"]);
    }

    #[test]
    fn test_configured_failures() {
        let mut options = MockOptions::new("key");
        options.fail_indexers.insert("Broken".to_string());
        let store = MockStore::new(options);

        assert_eq!(
            store.add_indexer(json!({"name": "Broken"})),
            Err(IndexerRejection::Configured("Broken".to_string()))
        );
        assert!(store.indexers().is_empty());
    }

    #[test]
    fn test_ids_are_shared_across_resources() {
        let store = MockStore::new(MockOptions::new("key"));
        assert_eq!(store.add_tag("flaresolverr").id, 1);
        assert_eq!(store.add_proxy(json!({"name": "FlareSolverr"}))["id"], 2);
        assert_eq!(store.tags().len(), 1);
        assert_eq!(store.proxies().len(), 1);
    }
}
