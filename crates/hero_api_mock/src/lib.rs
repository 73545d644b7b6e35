//! Deterministic scripted implementation of the `hero_api` transport.
//!
//! Replies are queued ahead of time and handed out in order; every request is
//! recorded so tests can assert on headers, bodies and attempt counts. There
//! is no networking here.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use hero_api::{HeroApiError, StatusCode, Transport};
use serde_json::{json, Value};

/// Account id embedded by [`landing_page`] when tests do not care.
pub const MOCK_ACCOUNT_ID: &str = "1234567";
/// Auth token embedded by [`landing_page`] when tests do not care.
pub const MOCK_AUTH_TOKEN: &str = "d41d8cd98f00b204e9800998ecf8427e";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    /// 2xx with this body.
    Body(String),
    /// Non-success HTTP status with this body.
    Status(StatusCode, String),
}

impl ScriptedReply {
    pub fn json(value: Value) -> Self {
        Self::Body(value.to_string())
    }

    /// Successful batch reply with one `{ident, result}` entry per pair.
    pub fn results(results: Vec<(&str, Value)>) -> Self {
        let results = results
            .into_iter()
            .map(|(ident, result)| json!({ "ident": ident, "result": result }))
            .collect::<Vec<_>>();
        Self::json(json!({ "results": results }))
    }

    /// Single-call reply whose result nests `response`.
    pub fn response(ident: &str, response: Value) -> Self {
        Self::results(vec![(ident, json!({ "response": response }))])
    }

    /// Whole-batch server error with the given symbolic name.
    pub fn api_error(name: &str) -> Self {
        Self::json(json!({
            "error": {
                "name": name,
                "description": format!("scripted {name}"),
            }
        }))
    }

    pub fn invalid_session() -> Self {
        Self::api_error(hero_api::error::INVALID_SESSION_ERROR)
    }

    pub fn not_enough() -> Self {
        Self::api_error(hero_api::error::NOT_ENOUGH_ERROR)
    }
}

/// Landing page HTML embedding the two session tokens.
pub fn landing_page(account_id: &str, auth_token: &str) -> String {
    format!(
        "<html><head><script>\nvar NXAccountId = '{account_id}';\nvar NXAuth = '{auth_token}';\n</script></head><body></body></html>"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: RequestMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Call names of a recorded batch, in order.
    pub fn call_names(&self) -> Vec<String> {
        let Some(body) = self.body.as_deref() else {
            return Vec::new();
        };
        let Ok(batch) = serde_json::from_str::<Value>(body) else {
            return Vec::new();
        };
        batch["calls"]
            .as_array()
            .map(|calls| {
                calls
                    .iter()
                    .filter_map(|call| call["name"].as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct Script {
    pages: VecDeque<ScriptedReply>,
    replies: VecDeque<ScriptedReply>,
    requests: Vec<RecordedRequest>,
}

/// Transport that replays queued replies and records every request.
///
/// An exhausted queue answers with [`HeroApiError::Unknown`], which surfaces
/// an unexpected extra request as a test failure rather than a hang.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<Script>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose first page fetch returns a landing page with the mock tokens.
    pub fn with_landing_page() -> Self {
        let transport = Self::new();
        transport.push_landing_page();
        transport
    }

    pub fn push_page(&self, reply: ScriptedReply) -> &Self {
        lock_unpoisoned(&self.script).pages.push_back(reply);
        self
    }

    pub fn push_landing_page(&self) -> &Self {
        self.push_page(ScriptedReply::Body(landing_page(
            MOCK_ACCOUNT_ID,
            MOCK_AUTH_TOKEN,
        )))
    }

    pub fn push_reply(&self, reply: ScriptedReply) -> &Self {
        lock_unpoisoned(&self.script).replies.push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock_unpoisoned(&self.script).requests.clone()
    }

    pub fn rpc_requests(&self) -> Vec<RecordedRequest> {
        self.requests_with(RequestMethod::Post)
    }

    pub fn page_requests(&self) -> Vec<RecordedRequest> {
        self.requests_with(RequestMethod::Get)
    }

    pub fn pending_replies(&self) -> usize {
        lock_unpoisoned(&self.script).replies.len()
    }

    fn requests_with(&self, method: RequestMethod) -> Vec<RecordedRequest> {
        lock_unpoisoned(&self.script)
            .requests
            .iter()
            .filter(|request| request.method == method)
            .cloned()
            .collect()
    }

    fn exchange(&self, request: RecordedRequest) -> Result<String, HeroApiError> {
        let mut script = lock_unpoisoned(&self.script);
        let method = request.method;
        let url = request.url.clone();
        script.requests.push(request);

        let reply = match method {
            RequestMethod::Get => script.pages.pop_front(),
            RequestMethod::Post => script.replies.pop_front(),
        };
        match reply {
            Some(ScriptedReply::Body(body)) => Ok(body),
            Some(ScriptedReply::Status(status, body)) => Err(HeroApiError::Status(
                status,
                hero_api::error::parse_error_message(status, &body),
            )),
            None => Err(HeroApiError::Unknown(format!(
                "no scripted reply left for {method:?} {url}"
            ))),
        }
    }
}

impl Transport for ScriptedTransport {
    async fn fetch_page(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, HeroApiError> {
        self.exchange(RecordedRequest {
            method: RequestMethod::Get,
            url: url.to_owned(),
            headers: headers.clone(),
            body: None,
        })
    }

    async fn post(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: String,
    ) -> Result<String, HeroApiError> {
        self.exchange(RecordedRequest {
            method: RequestMethod::Post,
            url: url.to_owned(),
            headers: headers.clone(),
            body: Some(body),
        })
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
