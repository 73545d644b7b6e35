use std::time::Duration;

use crate::url::{DEFAULT_API_URL, DEFAULT_SITE_URL};

/// Browser user agent presented on the landing page and every RPC call.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/84.0.4147.135 Safari/537.36";

/// Transport and protocol configuration for game RPC requests.
#[derive(Debug, Clone)]
pub struct HeroApiConfig {
    /// RPC endpoint receiving signed batches.
    pub api_url: String,
    /// Landing page fetched during bootstrap.
    pub site_url: String,
    /// Cookie header sent with the landing page fetch.
    pub cookie: String,
    pub user_agent: String,
    /// `X-Auth-Application-Id` header value.
    pub application_id: u32,
    /// `X-Auth-Network-Ident` header value.
    pub network_ident: String,
    /// `X-Env-Library-Version` header value.
    pub library_version: u32,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
}

impl Default for HeroApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            cookie: String::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            application_id: 3,
            network_ident: "web".to_string(),
            library_version: 1,
            timeout: None,
        }
    }
}

impl HeroApiConfig {
    pub fn new(cookie: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into(),
            ..Self::default()
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = cookie.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
