use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};

use crate::config::HeroApiConfig;
use crate::error::{parse_error_message, HeroApiError};

/// Raw HTTP exchange used by the RPC client.
///
/// Implementations return the response body of a successful (2xx) reply and
/// map everything else to a transport-level [`HeroApiError`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Unauthenticated GET of an HTML page.
    async fn fetch_page(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, HeroApiError>;

    /// POST of a serialized batch with its signed headers.
    async fn post(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: String,
    ) -> Result<String, HeroApiError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(config: &HeroApiConfig) -> Result<Self, HeroApiError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(config.user_agent.trim()).map_err(|_| {
                HeroApiError::InvalidHeader(format!(
                    "invalid user agent: {}",
                    config.user_agent
                ))
            })?,
        );

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(HeroApiError::from)?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    async fn fetch_page(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, HeroApiError> {
        let response = self.http.get(url).headers(to_header_map(headers)?).send().await?;
        read_success_body(response).await
    }

    async fn post(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: String,
    ) -> Result<String, HeroApiError> {
        let response = self
            .http
            .post(url)
            .headers(to_header_map(headers)?)
            .body(body)
            .send()
            .await?;
        read_success_body(response).await
    }
}

pub fn to_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, HeroApiError> {
    let mut out = HeaderMap::new();
    for (key, value) in headers {
        out.insert(
            HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| HeroApiError::InvalidHeader(format!("invalid header key: {key}")))?,
            HeaderValue::from_str(value)
                .map_err(|_| HeroApiError::InvalidHeader(format!("invalid header value for {key}")))?,
        );
    }
    Ok(out)
}

async fn read_success_body(response: Response) -> Result<String, HeroApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.text().await?);
    }

    let body = response.text().await.unwrap_or_else(|_| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });
    Err(HeroApiError::Status(status, parse_error_message(status, &body)))
}
