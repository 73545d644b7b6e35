use std::fmt;

use reqwest::StatusCode;
use serde_json::{Error as JsonError, Value};
use session_store::SessionStoreError;

/// Server-side symbolic name of an expired or rejected session.
pub const INVALID_SESSION_ERROR: &str = "common\\rpc\\exception\\InvalidSession";
/// Server-side symbolic name of a resource-exhaustion condition.
pub const NOT_ENOUGH_ERROR: &str = "NotEnough";

/// Closed classification of server-reported batch errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    InvalidSession,
    NotEnough,
    Other(String),
}

impl ApiErrorKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            INVALID_SESSION_ERROR => Self::InvalidSession,
            NOT_ENOUGH_ERROR => Self::NotEnough,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Error reported by the server for a whole batch, with its raw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    kind: ApiErrorKind,
    payload: Value,
}

impl ApiError {
    pub fn from_payload(payload: Value) -> Self {
        let kind = ApiErrorKind::from_name(payload_name(&payload).unwrap_or(""));
        Self { kind, payload }
    }

    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn name(&self) -> Option<&str> {
        payload_name(&self.payload)
    }

    pub fn is_invalid_session(&self) -> bool {
        self.kind == ApiErrorKind::InvalidSession
    }

    pub fn is_not_enough(&self) -> bool {
        self.kind == ApiErrorKind::NotEnough
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name().unwrap_or("unnamed server error");
        match payload_description(&self.payload) {
            Some(description) => write!(f, "{name}: {description}"),
            None => write!(f, "{name}"),
        }
    }
}

#[derive(Debug)]
pub enum HeroApiError {
    Api(ApiError),
    Request(reqwest::Error),
    Status(StatusCode, String),
    Serde(JsonError),
    MalformedResponse(String),
    MissingPageToken(&'static str),
    InvalidHeader(String),
    Store(SessionStoreError),
    Unknown(String),
}

impl HeroApiError {
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_invalid_session(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_invalid_session)
    }

    pub fn is_not_enough(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_not_enough)
    }
}

impl fmt::Display for HeroApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(error) => write!(f, "server error {error}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
            Self::MalformedResponse(message) => write!(f, "malformed response: {message}"),
            Self::MissingPageToken(token) => {
                write!(f, "landing page does not embed `{token}`")
            }
            Self::InvalidHeader(message) => write!(f, "invalid header: {message}"),
            Self::Store(error) => write!(f, "session store error: {error}"),
            Self::Unknown(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for HeroApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(error) => Some(error),
            Self::Serde(error) => Some(error),
            Self::Store(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ApiError> for HeroApiError {
    fn from(error: ApiError) -> Self {
        Self::Api(error)
    }
}

impl From<reqwest::Error> for HeroApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for HeroApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

impl From<SessionStoreError> for HeroApiError {
    fn from(error: SessionStoreError) -> Self {
        Self::Store(error)
    }
}

/// Human-readable message for a non-success HTTP reply.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<Value>(body) {
        let error = payload.get("error").unwrap_or(&payload);
        if let Some(message) = payload_description(error).or_else(|| payload_name(error)) {
            return message.to_owned();
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

fn payload_name(payload: &Value) -> Option<&str> {
    payload
        .get("name")
        .and_then(Value::as_str)
        .and_then(non_empty_string)
}

fn payload_description(payload: &Value) -> Option<&str> {
    payload
        .get("description")
        .or_else(|| payload.get("message"))
        .and_then(Value::as_str)
        .and_then(non_empty_string)
}

fn non_empty_string(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
