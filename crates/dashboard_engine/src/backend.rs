use std::future::Future;
use std::time::Duration;

use dashboard_logging::{dashboard_debug, dashboard_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde_json::Value;

use crate::{ApiError, ApiResult, FailureKind};

pub const BASE_URL_ENV: &str = "BAKERY_API_URL";
pub const TOKEN_ENV: &str = "BAKERY_API_TOKEN";
pub const TIMEOUT_ENV: &str = "BAKERY_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    /// Bearer token attached to every request.
    pub token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiSettings {
    /// Defaults overridden by `BAKERY_API_URL`, `BAKERY_API_TOKEN` and
    /// `BAKERY_API_TIMEOUT_SECS`. An unparsable timeout keeps the default.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.base_url = base_url.trim().to_string();
        }
        if let Some(token) = lookup(TOKEN_ENV).filter(|value| !value.trim().is_empty()) {
            self.token = Some(token.trim().to_string());
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.request_timeout = Duration::from_secs(secs),
                _ => dashboard_warn!("Ignoring invalid {}={:?}", TIMEOUT_ENV, raw),
            }
        }
        self
    }
}

/// Raw JSON access to the backend. Feature actions are written against this
/// trait; envelope handling lives in `normalize`.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value>;

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value>;
}

/// Invokes `request` and folds every outcome into an `ApiResult`.
///
/// Transport failures, non-2xx statuses and non-JSON bodies all come back as
/// `Err`; nothing escapes as a panic. An empty success body is `Value::Null`.
pub async fn api_request<F, Fut>(request: F) -> ApiResult<Value>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let response = request().await.map_err(map_reqwest_error)?;

    let status = response.status();
    if !status.is_success() {
        dashboard_debug!("Backend answered {} for {}", status, response.url());
        return Err(ApiError::from_kind(FailureKind::HttpStatus(status.as_u16())));
    }

    let body = response.bytes().await.map_err(map_reqwest_error)?;
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&body).map_err(|err| {
        dashboard_debug!("Backend body is not JSON: {}", err);
        ApiError::from_kind(FailureKind::Decode)
    })
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: ApiSettings) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| {
                dashboard_warn!("Failed to build HTTP client: {}", err);
                ApiError::from_kind(FailureKind::Network)
            })?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn endpoint(&self, path: &str, query: &[(String, String)]) -> ApiResult<reqwest::Url> {
        let raw = format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = reqwest::Url::parse(&raw).map_err(|err| {
            dashboard_warn!("Invalid endpoint {:?}: {}", raw, err);
            ApiError::from_kind(FailureKind::InvalidUrl)
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.settings.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn get(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value> {
        let url = self.endpoint(path, query)?;
        let builder = self.authorized(self.client.get(url));
        api_request(|| builder.send()).await
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        let url = self.endpoint(path, &[])?;
        let mut builder = self.authorized(self.client.request(method, url));
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }
        api_request(|| builder.send()).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    dashboard_debug!("Request failed: {}", err);
    if err.is_timeout() {
        return ApiError::from_kind(FailureKind::Timeout);
    }
    ApiError::from_kind(FailureKind::Network)
}
