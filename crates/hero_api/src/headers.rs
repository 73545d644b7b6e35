use std::collections::BTreeMap;

use session_store::Session;

use crate::config::HeroApiConfig;

pub const HEADER_APPLICATION_ID: &str = "X-Auth-Application-Id";
pub const HEADER_NETWORK_IDENT: &str = "X-Auth-Network-Ident";
pub const HEADER_SESSION_ID: &str = "X-Auth-Session-Id";
pub const HEADER_SESSION_KEY: &str = "X-Auth-Session-Key";
pub const HEADER_SESSION_INIT: &str = "X-Auth-Session-Init";
pub const HEADER_AUTH_TOKEN: &str = "X-Auth-Token";
pub const HEADER_USER_ID: &str = "X-Auth-User-Id";
pub const HEADER_SIGNATURE: &str = "X-Auth-Signature";
pub const HEADER_LIBRARY_VERSION: &str = "X-Env-Library-Version";
pub const HEADER_REFERRER: &str = "X-Env-Referrer";
pub const HEADER_REQUEST_ID: &str = "X-Request-Id";
pub const HEADER_REQUESTED_WITH: &str = "X-Requested-With";
pub const HEADER_SERVER_TIME: &str = "X-Server-Time";
pub const HEADER_COOKIE: &str = "Cookie";
pub const HEADER_USER_AGENT: &str = "User-Agent";

/// Build the unsigned identity headers for one RPC request.
///
/// `session.request_id` must already be the id of the request being sent.
pub fn build_headers(config: &HeroApiConfig, session: &Session) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();

    headers.insert(
        HEADER_APPLICATION_ID.to_owned(),
        config.application_id.to_string(),
    );
    headers.insert(
        HEADER_NETWORK_IDENT.to_owned(),
        config.network_ident.trim().to_owned(),
    );
    headers.insert(HEADER_SESSION_ID.to_owned(), session.session_id.clone());
    headers.insert(HEADER_SESSION_KEY.to_owned(), String::new());
    headers.insert(HEADER_AUTH_TOKEN.to_owned(), session.auth_token.clone());
    headers.insert(HEADER_USER_ID.to_owned(), session.account_id.clone());
    headers.insert(
        HEADER_LIBRARY_VERSION.to_owned(),
        config.library_version.to_string(),
    );
    headers.insert(HEADER_REQUEST_ID.to_owned(), session.request_id.to_string());
    headers.insert(
        HEADER_REQUESTED_WITH.to_owned(),
        "XMLHttpRequest".to_owned(),
    );
    headers.insert(HEADER_SERVER_TIME.to_owned(), "0".to_owned());

    if session.is_first_request() {
        headers.insert(HEADER_SESSION_INIT.to_owned(), "1".to_owned());
        headers.insert(HEADER_REFERRER.to_owned(), String::new());
    }

    headers
}

/// Headers for the unauthenticated landing page fetch.
pub fn build_page_headers(config: &HeroApiConfig) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(HEADER_COOKIE.to_owned(), config.cookie.clone());
    headers
}
