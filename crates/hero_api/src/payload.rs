use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, HeroApiError};

static NULL: Value = Value::Null;

/// One named remote call inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub name: String,
    #[serde(default = "empty_args")]
    pub args: Value,
    pub ident: String,
}

fn empty_args() -> Value {
    Value::Object(Map::new())
}

impl Call {
    /// A call without arguments; `args` serializes as `{}`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            ident: name.clone(),
            name,
            args: empty_args(),
        }
    }

    pub fn with_args(name: impl Into<String>, args: Value) -> Self {
        let args = if args.is_null() { empty_args() } else { args };
        Self {
            args,
            ..Self::new(name)
        }
    }
}

/// Wire body `{"calls": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub calls: Vec<Call>,
}

impl BatchRequest {
    /// Builds a batch, forcing every call's `ident` to its `name`.
    pub fn new(calls: impl IntoIterator<Item = Call>) -> Self {
        let calls = calls
            .into_iter()
            .map(|mut call| {
                call.ident = call.name.clone();
                call
            })
            .collect();
        Self { calls }
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// Raw reply: either a batch-wide `error` or one result per call.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub results: Option<Vec<RawCallResult>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCallResult {
    pub ident: String,
    #[serde(default)]
    pub result: Value,
}

impl BatchResponse {
    /// Unwraps the per-call results.
    ///
    /// A top-level `error` wins over any results that came with it.
    pub fn into_results(self, expected: usize) -> Result<Vec<CallResult>, HeroApiError> {
        if let Some(error) = self.error {
            return Err(HeroApiError::Api(ApiError::from_payload(error)));
        }

        let results = self.results.ok_or_else(|| {
            HeroApiError::MalformedResponse("reply has neither `error` nor `results`".to_owned())
        })?;
        if results.len() != expected {
            return Err(HeroApiError::MalformedResponse(format!(
                "expected {expected} results, got {}",
                results.len()
            )));
        }

        Ok(results
            .into_iter()
            .map(|raw| CallResult {
                name: raw.ident,
                result: raw.result,
            })
            .collect())
    }
}

/// One unwrapped call result, named after the call's ident.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    pub name: String,
    pub result: Value,
}

impl CallResult {
    /// The `response` member most calls nest their payload under; `Null` when absent.
    pub fn response(&self) -> &Value {
        self.result.get("response").unwrap_or(&NULL)
    }

    pub fn parse_response<T: DeserializeOwned>(&self) -> Result<T, HeroApiError> {
        Ok(T::deserialize(self.response())?)
    }

    /// Deserializes the value at a JSON pointer into the result, `Null` when absent.
    pub fn parse_at<T: DeserializeOwned>(&self, pointer: &str) -> Result<T, HeroApiError> {
        let value = self.result.pointer(pointer).unwrap_or(&NULL);
        Ok(T::deserialize(value)?)
    }
}
