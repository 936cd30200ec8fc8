//! client configuration
//!
//! build a [`ClientConfig`] with the graphql endpoint, credentials, and
//! optional overrides. pass it to [`crate::Client::new`] to create a client.

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// credentials sent in the `Authorization` header
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// api key issued to an agent: `key <person_id>:<key>`
    ApiKey { person_id: u64, key: String },
    /// session token issued to an agent: `token <person_id>:<token>`
    Token { person_id: u64, token: String },
    /// `Bearer <token>`
    Bearer(String),
}

impl Credentials {
    /// the `Authorization` header value
    pub fn header_value(&self) -> String {
        match self {
            Credentials::ApiKey { person_id, key } => format!("key {person_id}:{key}"),
            Credentials::Token { person_id, token } => format!("token {person_id}:{token}"),
            Credentials::Bearer(token) => format!("Bearer {token}"),
        }
    }
}

/// configuration for the graphql client
#[derive(Clone)]
pub struct ClientConfig {
    /// original endpoint input
    pub(crate) raw_endpoint: String,

    /// graphql endpoint (e.g., "<https://helpdesk.example.com/api/v2/graphql>")
    pub(crate) endpoint: Url,

    /// whether the provided endpoint parsed successfully
    pub(crate) endpoint_valid: bool,

    /// optional authorization credentials
    pub(crate) credentials: Option<Credentials>,

    /// request timeout duration
    pub(crate) timeout: Duration,

    /// user agent string
    pub(crate) user_agent: String,

    /// whether to verify ssl certificates
    pub(crate) verify_ssl: bool,

    /// additional headers to send with every request
    pub(crate) extra_headers: HeaderMap,

    /// prebuilt http client (takes precedence over http_client_builder)
    pub(crate) http_client: Option<reqwest::Client>,

    /// callback to customize the http client builder before building
    pub(crate) http_client_builder:
        Option<Arc<dyn Fn(reqwest::ClientBuilder) -> reqwest::ClientBuilder + Send + Sync>>,
}

impl ClientConfig {
    /// create a new client configuration
    ///
    /// # arguments
    ///
    /// * `endpoint` - the graphql endpoint url; a missing scheme defaults to https
    ///
    /// # example
    ///
    /// ```
    /// use graphql_builder::ClientConfig;
    ///
    /// let config = ClientConfig::new("https://helpdesk.example.com/api/v2/graphql")
    ///     .with_auth_key(1, "dev-admin-code");
    /// ```
    pub fn new(endpoint: impl AsRef<str>) -> Self {
        let raw = endpoint.as_ref().trim();

        let (endpoint, endpoint_valid) = match Url::parse(raw)
            .or_else(|_| Url::parse(&format!("https://{}", raw)))
        {
            Ok(url) => (url, true),
            Err(_) => (Url::parse("https://invalid.invalid").expect("static url"), false),
        };

        Self {
            raw_endpoint: raw.to_string(),
            endpoint,
            endpoint_valid,
            credentials: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("graphql-builder-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            verify_ssl: true,
            extra_headers: HeaderMap::new(),
            http_client: None,
            http_client_builder: None,
        }
    }

    /// authenticate with an api key
    pub fn with_auth_key(mut self, person_id: u64, key: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::ApiKey {
            person_id,
            key: key.into(),
        });
        self
    }

    /// authenticate with a session token
    pub fn with_auth_token(mut self, person_id: u64, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::Token {
            person_id,
            token: token.into(),
        });
        self
    }

    /// authenticate with a bearer token
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::Bearer(token.into()));
        self
    }

    /// set the request timeout
    ///
    /// default: 30 seconds
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// set a custom user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// disable ssl certificate verification (not recommended for production)
    ///
    /// default: enabled
    pub fn with_ssl_verification(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// add a header to every request
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra_headers.insert(name, value);
        self
    }

    /// add a set of headers to every request
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.extra_headers.extend(headers);
        self
    }

    /// inject a prebuilt http client.
    ///
    /// when set, this client is used as-is: credentials, extra headers,
    /// timeout, user agent, and ssl settings on this config are not applied.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// customize the http client builder before the client is created.
    ///
    /// the callback receives a builder with credentials, extra headers,
    /// user agent, timeout, and ssl settings already applied.
    ///
    /// ignored if `with_http_client` is also set.
    pub fn with_http_client_builder<F>(mut self, f: F) -> Self
    where
        F: Fn(reqwest::ClientBuilder) -> reqwest::ClientBuilder + Send + Sync + 'static,
    {
        self.http_client_builder = Some(Arc::new(f));
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// access extra headers configured on this client
    pub fn extra_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    /// validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.endpoint_valid {
            return Err(Error::Config(format!(
                "invalid endpoint url: {}",
                self.raw_endpoint
            )));
        }

        if self.endpoint.scheme() != "http" && self.endpoint.scheme() != "https" {
            return Err(Error::Config(format!(
                "invalid url scheme: {}. must be http or https",
                self.endpoint.scheme()
            )));
        }

        Ok(())
    }

    /// default headers for a client built from this config
    pub(crate) fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(credentials) = &self.credentials {
            let mut value = HeaderValue::from_str(&credentials.header_value())
                .map_err(|err| Error::Config(format!("invalid credentials header value: {err}")))?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }
        headers.extend(self.extra_headers.clone());
        Ok(headers)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey { person_id, .. } => f
                .debug_struct("ApiKey")
                .field("person_id", person_id)
                .field("key", &"<redacted>")
                .finish(),
            Credentials::Token { person_id, .. } => f
                .debug_struct("Token")
                .field("person_id", person_id)
                .field("token", &"<redacted>")
                .finish(),
            Credentials::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("verify_ssl", &self.verify_ssl)
            .field("extra_headers", &self.extra_headers.len())
            .field("http_client", &self.http_client.is_some())
            .field("http_client_builder", &self.http_client_builder.is_some())
            .finish()
    }
}
