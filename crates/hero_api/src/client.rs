use serde_json::Value;
use session_store::{AuditLog, Session, SessionStore};

use crate::bootstrap::{extract_landing_tokens, generate_session_id};
use crate::config::HeroApiConfig;
use crate::error::HeroApiError;
use crate::headers::{build_headers, build_page_headers, HEADER_SIGNATURE};
use crate::payload::{BatchRequest, BatchResponse, Call, CallResult};
use crate::retry::should_rebootstrap;
use crate::session::SessionState;
use crate::signature::sign;
use crate::transport::Transport;
use crate::url::{normalize_api_url, normalize_site_url};

/// Signed batch RPC client.
///
/// The client holds no session itself: every call takes the current
/// [`SessionState`] and hands back the state that follows it, alongside the
/// outcome. The returned state is valid even when the outcome is an error.
#[derive(Debug)]
pub struct RpcClient<T> {
    transport: T,
    config: HeroApiConfig,
    store: SessionStore,
    audit: AuditLog,
}

impl<T: Transport> RpcClient<T> {
    pub fn new(transport: T, config: HeroApiConfig, store: SessionStore, audit: AuditLog) -> Self {
        Self {
            transport,
            config,
            store,
            audit,
        }
    }

    pub fn config(&self) -> &HeroApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn api_endpoint(&self) -> String {
        normalize_api_url(&self.config.api_url)
    }

    /// Resolves the session to start a run with.
    ///
    /// Reuses the stored session unless `invalidate` is set or none is stored,
    /// in which case a fresh one is bootstrapped.
    pub async fn prepare(&self, invalidate: bool) -> Result<Session, HeroApiError> {
        if !invalidate {
            if let Some(session) = self.store.load()? {
                tracing::info!(session_id = %session.session_id, "connected with stored session");
                return Ok(session);
            }
        }
        self.bootstrap().await
    }

    /// Builds a brand-new session from the landing page and persists it.
    pub async fn bootstrap(&self) -> Result<Session, HeroApiError> {
        let page = self
            .transport
            .fetch_page(
                &normalize_site_url(&self.config.site_url),
                &build_page_headers(&self.config),
            )
            .await?;
        let tokens = extract_landing_tokens(&page)?;
        let session = Session::new(tokens.account_id, tokens.auth_token, generate_session_id());
        self.store.save(&session)?;

        tracing::info!(session_id = %session.session_id, "connected with fresh session");
        Ok(session)
    }

    /// Sends a single-call batch and returns that call's result.
    pub async fn call_one(
        &self,
        state: SessionState,
        name: &str,
        args: Value,
    ) -> (SessionState, Result<CallResult, HeroApiError>) {
        let (state, result) = self.call(state, vec![Call::with_args(name, args)]).await;
        let result = result.and_then(|results| {
            results.into_iter().next().ok_or_else(|| {
                HeroApiError::MalformedResponse(format!("no result for `{name}`"))
            })
        });
        (state, result)
    }

    /// Sends `calls` as one signed batch.
    ///
    /// An invalid-session reply triggers exactly one re-bootstrap and a resend
    /// of the whole batch; whatever the resend yields is final. An
    /// `Uninitialized` state is bootstrapped before the first attempt.
    pub async fn call(
        &self,
        state: SessionState,
        calls: Vec<Call>,
    ) -> (SessionState, Result<Vec<CallResult>, HeroApiError>) {
        let mut session = match state {
            SessionState::Active(session) => session,
            SessionState::Uninitialized => match self.bootstrap().await {
                Ok(session) => session,
                Err(error) => return (SessionState::Uninitialized, Err(error)),
            },
        };
        let batch = BatchRequest::new(calls);
        let mut attempt = 0;

        loop {
            session = session.next_request();
            match self.dispatch(&session, &batch).await {
                Err(error) if should_rebootstrap(&error, attempt) => {
                    tracing::warn!(
                        request_id = session.request_id,
                        %error,
                        "session rejected, bootstrapping a new one"
                    );
                    attempt += 1;
                    session = match self.bootstrap().await {
                        Ok(fresh) => fresh,
                        Err(error) => return (SessionState::Uninitialized, Err(error)),
                    };
                }
                result => return (SessionState::Active(session), result),
            }
        }
    }

    /// One signed attempt with `session`, whose request id is already claimed.
    async fn dispatch(
        &self,
        session: &Session,
        batch: &BatchRequest,
    ) -> Result<Vec<CallResult>, HeroApiError> {
        let mut headers = build_headers(&self.config, session);
        let body = serde_json::to_string(batch)?;

        let audit_key = self
            .audit
            .record_request(session.request_id, &serde_json::to_value(batch)?)?;
        self.store.save(session)?;

        headers.insert(HEADER_SIGNATURE.to_owned(), sign(&headers, &body));
        tracing::debug!(
            request_id = session.request_id,
            calls = batch.len(),
            "sending batch"
        );

        let raw = self
            .transport
            .post(&self.api_endpoint(), &headers, body)
            .await?;
        let reply: Value = match serde_json::from_str(&raw) {
            Ok(reply) => reply,
            Err(error) => {
                self.audit.record_response(&audit_key, &Value::String(raw))?;
                return Err(error.into());
            }
        };
        self.audit.record_response(&audit_key, &reply)?;

        serde_json::from_value::<BatchResponse>(reply)?.into_results(batch.len())
    }
}
