//! Transport layer — one HTTP round trip per call
//!
//! The facade only depends on the [`Transport`] trait. [`HttpTransport`] is
//! the production implementation on top of `reqwest`.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ArangoError, ArangoResult};

/// Characters escaped when a name is placed in a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a user supplied name for use as a single path segment
pub fn path_segment(name: &str) -> String {
    utf8_percent_encode(name, PATH_SEGMENT).to_string()
}

/// HTTP method of a [`Request`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A database-relative API request, e.g. `POST /_api/cursor`
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path below the database prefix, starting with `/_api/`
    pub path: String,
    /// Query string parameters
    pub params: Vec<(String, String)>,
    /// JSON body, sent only when present
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// Status code plus parsed JSON body of a server reply
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status_code: u16,
    pub body: Value,
}

impl Response {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }

    /// `errorMessage` from an ArangoDB error body
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("errorMessage").and_then(Value::as_str)
    }

    /// `errorNum` from an ArangoDB error body
    pub fn error_num(&self) -> Option<i64> {
        self.body.get("errorNum").and_then(Value::as_i64)
    }

    /// Map the response to `Ok(self)` if its status is one of `success`,
    /// otherwise to the error built by `to_error`.
    pub fn expect_status(
        self,
        success: &[u16],
        to_error: fn(Response) -> ArangoError,
    ) -> ArangoResult<Response> {
        if success.contains(&self.status_code) {
            Ok(self)
        } else {
            Err(to_error(self))
        }
    }

    /// Borrow a top-level body field that a successful reply must contain
    pub fn field(&self, key: &str) -> ArangoResult<&Value> {
        self.body.get(key).ok_or_else(|| {
            ArangoError::UnexpectedResponse(format!(
                "missing field '{}' in HTTP {} reply",
                key, self.status_code
            ))
        })
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status_code)?;
        if let Some(message) = self.error_message() {
            write!(f, ": {}", message)?;
        }
        if let Some(num) = self.error_num() {
            write!(f, " (error {})", num)?;
        }
        Ok(())
    }
}

/// Issues a single request and returns the server's reply.
///
/// Non-success status codes are *not* errors at this layer; only failures to
/// complete the round trip are. Interpretation belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> ArangoResult<Response>;

    async fn get(&self, path: &str) -> ArangoResult<Response> {
        self.send(Request::new(Method::Get, path)).await
    }

    async fn post(&self, path: &str, body: Value) -> ArangoResult<Response> {
        self.send(Request::new(Method::Post, path).with_body(body)).await
    }

    async fn put(&self, path: &str, body: Value) -> ArangoResult<Response> {
        self.send(Request::new(Method::Put, path).with_body(body)).await
    }

    async fn delete(&self, path: &str) -> ArangoResult<Response> {
        self.send(Request::new(Method::Delete, path)).await
    }
}

/// Transport speaking HTTP to an ArangoDB server via `reqwest`.
///
/// Every request path is placed under `/_db/{database}`.
pub struct HttpTransport {
    db_url: String,
    username: String,
    password: Option<String>,
    http_client: Client,
}

impl HttpTransport {
    /// Create a transport for the database named in `config`
    pub fn new(config: &ClientConfig) -> ArangoResult<Self> {
        if config.database.is_empty() {
            return Err(ArangoError::Config("database name must not be empty".to_string()));
        }
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ArangoError::Config(e.to_string()))?;

        Ok(Self {
            db_url: format!(
                "{}/_db/{}",
                config.url.trim_end_matches('/'),
                path_segment(&config.database)
            ),
            username: config.username.clone(),
            password: config.password.clone(),
            http_client,
        })
    }

    fn url_for(&self, request: &Request) -> String {
        let mut url = format!("{}{}", self.db_url, request.path);
        for (i, (key, value)) in request.params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&utf8_percent_encode(key, NON_ALPHANUMERIC).to_string());
            url.push('=');
            url.push_str(&utf8_percent_encode(value, NON_ALPHANUMERIC).to_string());
        }
        url
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("db_url", &self.db_url)
            .field("username", &self.username)
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> ArangoResult<Response> {
        let url = self.url_for(&request);
        let mut builder = self.http_client.request(request.method.into(), &url);
        if let Some(password) = &self.password {
            builder = builder.basic_auth(&self.username, Some(password));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status_code = response.status().as_u16();
        let text = response.text().await?;
        debug!("{} {} -> {}", request.method, request.path, status_code);

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Ok(Response::new(status_code, body))
    }
}
