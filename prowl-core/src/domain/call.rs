//! Call domain types
//!
//! Every request the setup driver makes goes through a single executor. The
//! types here describe one such call: where it goes, what happens when it
//! fails, and how it turned out.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// HTTP verbs used against the target API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// The places in the setup sequence that talk to the target API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallSite {
    /// `GET /health`
    Health,
    /// `POST /tag`
    CreateTag,
    /// `POST /indexerProxy`
    RegisterProxy,
    /// `POST /indexer`
    CreateIndexer,
    /// `POST /indexer/action/checkCaptcha`
    CheckCaptcha,
}

impl CallSite {
    /// Path of the endpoint relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            CallSite::Health => "/health",
            CallSite::CreateTag => "/tag",
            CallSite::RegisterProxy => "/indexerProxy",
            CallSite::CreateIndexer => "/indexer",
            CallSite::CheckCaptcha => "/indexer/action/checkCaptcha",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            CallSite::Health => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }
}

impl std::fmt::Display for CallSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallSite::Health => write!(f, "health"),
            CallSite::CreateTag => write!(f, "create-tag"),
            CallSite::RegisterProxy => write!(f, "register-proxy"),
            CallSite::CreateIndexer => write!(f, "create"),
            CallSite::CheckCaptcha => write!(f, "checkCaptcha"),
        }
    }
}

/// Failure policy supplied at each call site
///
/// A failed call either aborts the whole run (`skip_on_failure == false`) or
/// is reported and the run carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPolicy {
    pub skip_on_failure: bool,
}

impl RunPolicy {
    /// Abort the run on failure
    pub const FATAL: RunPolicy = RunPolicy {
        skip_on_failure: false,
    };

    /// Report the failure and continue
    pub const TOLERANT: RunPolicy = RunPolicy {
        skip_on_failure: true,
    };

    pub fn is_fatal(&self) -> bool {
        !self.skip_on_failure
    }
}

/// A single request against the target API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub site: CallSite,
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<JsonValue>,
}

impl ApiRequest {
    /// Build a request for a call site with its default method and path
    pub fn new(site: CallSite, body: Option<JsonValue>) -> Self {
        Self {
            site,
            method: site.method(),
            path: site.path().to_string(),
            body,
        }
    }

    /// Build a bodiless request
    pub fn empty(site: CallSite) -> Self {
        Self::new(site, None)
    }
}

/// Raw response as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Classified result of one call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOutcome {
    /// 2xx response
    Success { status: u16, body: String },
    /// Non-2xx response, or a transport error (no status, error text as body)
    Failure { status: Option<u16>, body: String },
}

impl CallOutcome {
    /// Classify a wire response by its status code
    pub fn from_response(response: ApiResponse) -> Self {
        if response.is_success() {
            CallOutcome::Success {
                status: response.status,
                body: response.body,
            }
        } else {
            CallOutcome::Failure {
                status: Some(response.status),
                body: response.body,
            }
        }
    }

    /// Outcome for a request that never got a response
    pub fn transport_failure(error: impl std::fmt::Display) -> Self {
        CallOutcome::Failure {
            status: None,
            body: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CallOutcome::Success { status, .. } => Some(*status),
            CallOutcome::Failure { status, .. } => *status,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            CallOutcome::Success { body, .. } | CallOutcome::Failure { body, .. } => body,
        }
    }
}
