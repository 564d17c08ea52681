use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::body::RequestBody;
use super::response::{self, Payload};
use crate::auth::{CredentialSource, UnauthorizedHandler};
use crate::config;
use crate::error::{ApiError, ErrorKind};

/// Per-request options
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Attach a bearer credential (default `true`)
    pub use_auth: bool,
    /// Explicit token, skips credential resolution
    pub token: Option<String>,
    /// Header overrides, applied over the defaults
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            use_auth: true,
            token: None,
            headers: Vec::new(),
            query: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unauthenticated() -> Self {
        Self {
            use_auth: false,
            ..Self::default()
        }
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query<K: Into<String>, V: ToString>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }
}

/// Authenticated HTTP client for the console backend.
///
/// Every call is independent: no retries, no cancellation. Non-2xx responses
/// come back as classified [`ApiError`]s; a 401 additionally triggers the
/// configured [`UnauthorizedHandler`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Arc<dyn CredentialSource>>,
    unauthorized: Option<Arc<dyn UnauthorizedHandler>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let user_agent = config::config().api.user_agent.clone();
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: None,
            unauthorized: None,
        }
    }

    /// Client pointed at `CONSOLE_API_URL`
    pub fn from_config() -> Self {
        Self::new(config::config().api.base_url.clone())
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialSource>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_unauthorized_handler(mut self, handler: Arc<dyn UnauthorizedHandler>) -> Self {
        self.unauthorized = Some(handler);
        self
    }

    /// Same transport and credentials, but a 401 is only reported to the
    /// caller. Used where a 401 means "wrong password", not "session over".
    pub fn without_unauthorized_handler(&self) -> Self {
        Self {
            unauthorized: None,
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URLs pass through, relative paths are joined onto the base
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Missing or unreadable credentials never fail the request
    async fn resolve_token(&self, options: &RequestOptions, url: &str) -> Option<String> {
        if !options.use_auth {
            return None;
        }
        if let Some(token) = options.token.as_ref().filter(|t| !t.is_empty()) {
            return Some(token.clone());
        }

        let source = self.credentials.as_ref()?;
        match source.access_token().await {
            Ok(Some(token)) => Some(token),
            Ok(None) => {
                tracing::warn!("No auth token found for request: {}", url);
                None
            }
            Err(e) => {
                tracing::warn!("Error getting auth token for {}: {}", url, e);
                None
            }
        }
    }

    fn build_headers(
        &self,
        body: &RequestBody,
        options: &RequestOptions,
        token: Option<&str>,
    ) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();

        match body {
            RequestBody::Multipart(_) => {}
            RequestBody::Text(_) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
            }
            RequestBody::Empty | RequestBody::Json(_) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
        }

        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ApiError::new(ErrorKind::Unknown, None, format!("Invalid header name '{}': {}", name, e))
            })?;
            // The transport owns the multipart boundary
            if body.is_multipart() && name == CONTENT_TYPE {
                continue;
            }
            let value = HeaderValue::from_str(value).map_err(|e| {
                ApiError::new(ErrorKind::Unknown, None, format!("Invalid value for header '{}': {}", name, e))
            })?;
            headers.insert(name, value);
        }

        if let Some(token) = token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("Ignoring auth token that is not a valid header value"),
            }
        }

        Ok(headers)
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<Payload, ApiError> {
        let url = self.url_for(path);
        let token = self.resolve_token(&options, &url).await;
        let headers = self.build_headers(&body, &options, token.as_deref())?;

        tracing::debug!("{} {} (auth: {})", method, url, token.is_some());
        if config::config().logging.log_request_bodies {
            if let RequestBody::Json(value) = &body {
                tracing::debug!("request body: {}", value);
            }
        }

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Text(text) => builder.body(text),
            RequestBody::Multipart(form) => builder.multipart(form.into_reqwest()?),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::warn!("{} {} failed before a response: {}", method, url, e);
            ApiError::from(e)
        })?;

        let status = response.status().as_u16();
        if status == 401 {
            if let Some(handler) = &self.unauthorized {
                handler.on_unauthorized(&url);
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await.map_err(ApiError::from)?;

        let result = response::interpret(status, content_type.as_deref(), text);
        if let Err(e) = &result {
            tracing::debug!("{} {} -> {} {}: {}", method, url, status, e.error, e);
        }
        result
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
        self.request(Method::GET, path, RequestBody::Empty, options)
            .await?
            .decode()
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: impl Into<RequestBody>,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, body.into(), options)
            .await?
            .decode()
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: impl Into<RequestBody>,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::PATCH, path, body.into(), options)
            .await?
            .decode()
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: impl Into<RequestBody>,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, body.into(), options)
            .await?
            .decode()
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, RequestBody::Empty, options)
            .await?
            .decode()
    }
}
