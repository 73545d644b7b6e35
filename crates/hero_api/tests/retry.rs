use reqwest::StatusCode;
use serde_json::json;

use hero_api::retry::*;
use hero_api::{ApiError, HeroApiError};

fn api_error(name: &str) -> HeroApiError {
    HeroApiError::Api(ApiError::from_payload(json!({"name": name})))
}

#[test]
fn invalid_session_is_retried_once() {
    let error = api_error("common\\rpc\\exception\\InvalidSession");
    assert!(should_rebootstrap(&error, 0));
    assert!(!should_rebootstrap(&error, MAX_SESSION_RETRIES));
}

#[test]
fn other_errors_are_never_retried() {
    assert!(!should_rebootstrap(&api_error("NotEnough"), 0));
    assert!(!should_rebootstrap(&api_error("ArgumentError"), 0));
    assert!(!should_rebootstrap(
        &HeroApiError::Status(StatusCode::SERVICE_UNAVAILABLE, "down".to_owned()),
        0
    ));
    assert!(!should_rebootstrap(
        &HeroApiError::MalformedResponse("truncated".to_owned()),
        0
    ));
}
