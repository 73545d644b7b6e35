use hero_api::url::{normalize_api_url, normalize_site_url, DEFAULT_API_URL, DEFAULT_SITE_URL};

#[test]
fn url_normalization_appends_api_path() {
    assert_eq!(
        normalize_api_url("https://heroes-wb.nextersglobal.com"),
        "https://heroes-wb.nextersglobal.com/api/"
    );
}

#[test]
fn url_normalization_keeps_existing_api_path() {
    assert_eq!(
        normalize_api_url("https://heroes-wb.nextersglobal.com/api"),
        "https://heroes-wb.nextersglobal.com/api/"
    );
    assert_eq!(
        normalize_api_url("http://127.0.0.1:8080/api///"),
        "http://127.0.0.1:8080/api/"
    );
}

#[test]
fn url_normalization_defaults_blank_input() {
    assert_eq!(normalize_api_url("   "), DEFAULT_API_URL);
    assert_eq!(normalize_site_url(""), DEFAULT_SITE_URL);
}
