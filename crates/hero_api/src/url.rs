/// Default RPC endpoint.
pub const DEFAULT_API_URL: &str = "https://heroes-wb.nextersglobal.com/api/";
/// Default landing page carrying the embedded session tokens.
pub const DEFAULT_SITE_URL: &str = "https://hero-wars.com/";

/// Normalize the RPC endpoint.
///
/// Normalization rules:
/// 1) blank input falls back to [`DEFAULT_API_URL`]
/// 2) append `/api/` when the path does not already end in `/api`
/// 3) always end with a single `/`
pub fn normalize_api_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_API_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/api") {
        return format!("{trimmed}/");
    }
    format!("{trimmed}/api/")
}

/// Landing page URL, falling back to [`DEFAULT_SITE_URL`] for blank input.
pub fn normalize_site_url(input: &str) -> String {
    if input.trim().is_empty() {
        DEFAULT_SITE_URL.to_owned()
    } else {
        input.trim().to_owned()
    }
}
