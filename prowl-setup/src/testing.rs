//! In-memory transport for unit tests

use async_trait::async_trait;
use prowl_client::{ClientError, Result, Transport};
use prowl_core::domain::call::{ApiRequest, ApiResponse, CallSite};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Reply {
    Response(u16, String),
    Unreachable,
}

/// Transport answering from a script and recording every request
///
/// Lookup order for each request: queued one-shot replies for the call site,
/// then a sticky reply for the (site, indexer name) pair, then a sticky reply
/// for the site, then `200 {}`.
#[derive(Default)]
pub struct ScriptedTransport {
    queued: Mutex<HashMap<CallSite, VecDeque<Reply>>>,
    sticky: HashMap<(CallSite, Option<String>), Reply>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer `site` with this status and body
    pub fn respond(mut self, site: CallSite, status: u16, body: &str) -> Self {
        self.sticky
            .insert((site, None), Reply::Response(status, body.to_string()));
        self
    }

    /// Answer `site` for the indexer called `name` with this status
    pub fn respond_for(mut self, site: CallSite, name: &str, status: u16, body: &str) -> Self {
        self.sticky.insert(
            (site, Some(name.to_string())),
            Reply::Response(status, body.to_string()),
        );
        self
    }

    /// Answer the next request to `site` with this status, once
    pub fn then(self, site: CallSite, status: u16, body: &str) -> Self {
        self.queued
            .lock()
            .unwrap()
            .entry(site)
            .or_default()
            .push_back(Reply::Response(status, body.to_string()));
        self
    }

    /// Fail every request to `site` before any response
    pub fn unreachable(mut self, site: CallSite) -> Self {
        self.sticky.insert((site, None), Reply::Unreachable);
        self
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls rendered as `site(name)` / `site`
    pub fn call_log(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|req| {
                match req
                    .body
                    .as_ref()
                    .and_then(|b| b.get("name"))
                    .and_then(|n| n.as_str())
                {
                    Some(name) => format!("{}({})", req.site, name),
                    None => req.site.to_string(),
                }
            })
            .collect()
    }

    pub fn count(&self, site: CallSite) -> usize {
        self.calls().iter().filter(|c| c.site == site).count()
    }

    fn reply_for(&self, request: &ApiRequest) -> Reply {
        if let Some(reply) = self
            .queued
            .lock()
            .unwrap()
            .get_mut(&request.site)
            .and_then(VecDeque::pop_front)
        {
            return reply;
        }

        let name = request
            .body
            .as_ref()
            .and_then(|b| b.get("name"))
            .and_then(|n| n.as_str())
            .map(str::to_string);

        self.sticky
            .get(&(request.site, name))
            .or_else(|| self.sticky.get(&(request.site, None)))
            .cloned()
            .unwrap_or(Reply::Response(200, "{}".to_string()))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(request.clone());

        match self.reply_for(request) {
            Reply::Response(status, body) => Ok(ApiResponse { status, body }),
            Reply::Unreachable => {
                let err = reqwest::Client::new()
                    .get("unreachable host")
                    .build()
                    .unwrap_err();
                Err(ClientError::RequestFailed(err))
            }
        }
    }
}
