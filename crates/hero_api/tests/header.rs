use hero_api::headers::{
    build_headers, build_page_headers, HEADER_APPLICATION_ID, HEADER_AUTH_TOKEN, HEADER_COOKIE,
    HEADER_LIBRARY_VERSION, HEADER_NETWORK_IDENT, HEADER_REFERRER, HEADER_REQUESTED_WITH,
    HEADER_REQUEST_ID, HEADER_SERVER_TIME, HEADER_SESSION_ID, HEADER_SESSION_INIT,
    HEADER_SESSION_KEY, HEADER_USER_ID,
};
use hero_api::{HeroApiConfig, Session};

fn session() -> Session {
    Session::new("777", "auth-token", "0123456789abcd")
}

#[test]
fn header_map_contains_identity_headers() {
    let config = HeroApiConfig::default();
    let session = session().next_request().next_request();

    let headers = build_headers(&config, &session);
    assert_eq!(headers[HEADER_APPLICATION_ID], "3");
    assert_eq!(headers[HEADER_NETWORK_IDENT], "web");
    assert_eq!(headers[HEADER_SESSION_ID], "0123456789abcd");
    assert_eq!(headers[HEADER_SESSION_KEY], "");
    assert_eq!(headers[HEADER_AUTH_TOKEN], "auth-token");
    assert_eq!(headers[HEADER_USER_ID], "777");
    assert_eq!(headers[HEADER_LIBRARY_VERSION], "1");
    assert_eq!(headers[HEADER_REQUEST_ID], "2");
    assert_eq!(headers[HEADER_REQUESTED_WITH], "XMLHttpRequest");
    assert_eq!(headers[HEADER_SERVER_TIME], "0");
    assert!(!headers.contains_key(HEADER_SESSION_INIT));
    assert!(!headers.contains_key(HEADER_REFERRER));
}

#[test]
fn first_request_carries_session_init_headers() {
    let config = HeroApiConfig::default();
    let headers = build_headers(&config, &session().next_request());

    assert_eq!(headers[HEADER_REQUEST_ID], "1");
    assert_eq!(headers[HEADER_SESSION_INIT], "1");
    assert_eq!(headers[HEADER_REFERRER], "");
}

#[test]
fn page_headers_carry_configured_cookie() {
    let config = HeroApiConfig::new("sid=abc; lang=en");
    let headers = build_page_headers(&config);
    assert_eq!(headers[HEADER_COOKIE], "sid=abc; lang=en");
}
