use serde::{Deserialize, Serialize};

/// Authenticated identity presented on every RPC call.
///
/// Persisted as `{requestId, accountId, sessionId, authToken}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Identifier of the most recently issued request; the next one is `request_id + 1`.
    pub request_id: u64,
    pub account_id: String,
    pub session_id: String,
    pub auth_token: String,
}

impl Session {
    /// A freshly bootstrapped session that has not issued any request yet.
    #[must_use]
    pub fn new(
        account_id: impl Into<String>,
        auth_token: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            request_id: 0,
            account_id: account_id.into(),
            session_id: session_id.into(),
            auth_token: auth_token.into(),
        }
    }

    /// The session as it stands once the next request id has been claimed.
    #[must_use]
    pub fn next_request(self) -> Self {
        Self {
            request_id: self.request_id.saturating_add(1),
            ..self
        }
    }

    /// The first request of a session carries the session-init headers.
    #[must_use]
    pub fn is_first_request(&self) -> bool {
        self.request_id == 1
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.account_id.trim().is_empty()
            && !self.session_id.trim().is_empty()
            && !self.auth_token.trim().is_empty()
    }
}
