// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Per-call transport settings.
//!
//! [`TransportOptions`] is everything needed to issue one request. The adapter
//! derives a base set from its configuration and then lets the caller's
//! [`TransportOverrides`] replace any field the caller chose to set.

use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

use reqwest::{Method, header::CONTENT_TYPE};
use thiserror::Error;
use url::Url;

use super::adapter_config::Credentials;

/// The HTTP verbs factomd accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A verb other than `GET` or `POST`. The adapter turns this into
/// [`FactomApiError::InvalidMethod`](super::FactomApiError::InvalidMethod)
/// naming the action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported HTTP method \"{0}\"")]
pub struct UnsupportedMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("GET") {
            Ok(HttpMethod::Get)
        } else if s.eq_ignore_ascii_case("POST") {
            Ok(HttpMethod::Post)
        } else {
            Err(UnsupportedMethod(s.to_string()))
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

/// Fully resolved settings for a single request.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub url: Url,
    pub http_method: HttpMethod,
    pub content_type: String,
    /// Serialized JSON-RPC envelope.
    pub body: String,
    pub timeout: Duration,
    pub basic_auth: Option<Credentials>,
    /// When `false` the server certificate is not checked at all.
    pub verify_peer: bool,
    /// PEM file added as a trusted root for this request.
    pub root_certificate: Option<PathBuf>,
    pub extra_headers: Vec<(String, String)>,
}

impl TransportOptions {
    /// Builds a fresh client for these options. The client lives only as
    /// long as the request that uses it.
    pub(crate) async fn build_client(&self) -> Result<reqwest::Client, String> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(!self.verify_peer);

        if let Some(path) = &self.root_certificate {
            let pem = tokio::fs::read(path)
                .await
                .map_err(|e| format!("Could not read certificate {}: {}", path.display(), e))?;
            let certificate = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| format!("Invalid certificate {}: {}", path.display(), e))?;
            builder = builder.add_root_certificate(certificate);
        }

        builder.build().map_err(|e| e.to_string())
    }

    /// A `Content-Type` among `extra_headers` replaces `content_type`
    /// instead of being sent alongside it.
    pub(crate) fn build_request(&self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        let mut request = client
            .request(self.http_method.into(), self.url.clone())
            .body(self.body.clone());

        if !self.has_extra_header(CONTENT_TYPE.as_str()) {
            request = request.header(CONTENT_TYPE, self.content_type.as_str());
        }

        for (name, value) in &self.extra_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if let Some(credentials) = &self.basic_auth {
            request = request.basic_auth(credentials.username(), Some(credentials.password()));
        }

        request
    }

    fn has_extra_header(&self, name: &str) -> bool {
        self.extra_headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

/// Caller supplied replacements for individual [`TransportOptions`] fields.
///
/// Every field that is set wins over the adapter's default; unset fields
/// keep the default.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use factom_api::http::TransportOverrides;
///
/// let overrides = TransportOverrides::default()
///     .timeout(Duration::from_secs(30))
///     .header("X-Request-Source", "explorer");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransportOverrides {
    pub url: Option<Url>,
    pub http_method: Option<HttpMethod>,
    pub content_type: Option<String>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
    /// `Some(None)` turns authentication off for the call.
    pub basic_auth: Option<Option<Credentials>>,
    pub verify_peer: Option<bool>,
    pub root_certificate: Option<Option<PathBuf>>,
    /// Raw headers added to the request. A `Content-Type` entry replaces
    /// the content type.
    pub extra_headers: Vec<(String, String)>,
}

impl TransportOverrides {
    pub fn url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    pub fn http_method(mut self, method: HttpMethod) -> Self {
        self.http_method = Some(method);
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn basic_auth(mut self, credentials: Credentials) -> Self {
        self.basic_auth = Some(Some(credentials));
        self
    }

    pub fn without_auth(mut self) -> Self {
        self.basic_auth = Some(None);
        self
    }

    pub fn verify_peer(mut self, verify: bool) -> Self {
        self.verify_peer = Some(verify);
        self
    }

    pub fn root_certificate(mut self, path: Option<PathBuf>) -> Self {
        self.root_certificate = Some(path);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Merges onto `base`, keeping every value the caller set.
    pub fn apply(self, base: TransportOptions) -> TransportOptions {
        let extra_headers = if self.extra_headers.is_empty() {
            base.extra_headers
        } else {
            self.extra_headers
        };

        TransportOptions {
            url: self.url.unwrap_or(base.url),
            http_method: self.http_method.unwrap_or(base.http_method),
            content_type: self.content_type.unwrap_or(base.content_type),
            body: self.body.unwrap_or(base.body),
            timeout: self.timeout.unwrap_or(base.timeout),
            basic_auth: self.basic_auth.unwrap_or(base.basic_auth),
            verify_peer: self.verify_peer.unwrap_or(base.verify_peer),
            root_certificate: self.root_certificate.unwrap_or(base.root_certificate),
            extra_headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_options() -> TransportOptions {
        TransportOptions {
            url: Url::parse("http://localhost:8088/v2").unwrap(),
            http_method: HttpMethod::Post,
            content_type: "text/plain".to_string(),
            body: "{}".to_string(),
            timeout: Duration::from_secs(10),
            basic_auth: Some(Credentials::new("factom", "secret")),
            verify_peer: true,
            root_certificate: None,
            extra_headers: Vec::new(),
        }
    }

    #[test]
    fn test_method_parsing_ignores_case() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
    }

    #[test]
    fn test_unsupported_methods_are_rejected() {
        for verb in ["PUT", "delete", "patch", "", " GET"] {
            match verb.parse::<HttpMethod>() {
                Err(UnsupportedMethod(got)) => assert_eq!(got, verb),
                other => panic!("expected invalid method for {:?}, got {:?}", verb, other),
            }
        }
    }

    #[test]
    fn test_empty_overrides_keep_base() {
        let merged = TransportOverrides::default().apply(base_options());

        assert_eq!(merged.url.as_str(), "http://localhost:8088/v2");
        assert_eq!(merged.http_method, HttpMethod::Post);
        assert_eq!(merged.content_type, "text/plain");
        assert_eq!(merged.timeout, Duration::from_secs(10));
        assert!(merged.verify_peer);
        assert_eq!(merged.basic_auth.unwrap().username(), "factom");
    }

    #[test]
    fn test_caller_values_win() {
        let merged = TransportOverrides::default()
            .content_type("application/json")
            .timeout(Duration::from_secs(3))
            .verify_peer(false)
            .without_auth()
            .header("X-Trace", "1")
            .apply(base_options());

        assert_eq!(merged.content_type, "application/json");
        assert_eq!(merged.timeout, Duration::from_secs(3));
        assert!(!merged.verify_peer);
        assert!(merged.basic_auth.is_none());
        assert_eq!(merged.extra_headers, vec![("X-Trace".to_string(), "1".to_string())]);
        // untouched fields come from the base
        assert_eq!(merged.body, "{}");
        assert_eq!(merged.http_method, HttpMethod::Post);
    }

    #[test]
    fn test_content_type_header_replaces_base() {
        let options = TransportOverrides::default()
            .header("content-TYPE", "application/json")
            .apply(base_options());
        let client = reqwest::Client::new();

        let request = options.build_request(&client).build().unwrap();
        let values: Vec<_> = request.headers().get_all(CONTENT_TYPE).iter().collect();

        assert_eq!(values, vec!["application/json"]);
    }

    #[test]
    fn test_base_content_type_sent_once_by_default() {
        let options = TransportOverrides::default()
            .header("X-Trace", "1")
            .apply(base_options());
        let client = reqwest::Client::new();

        let request = options.build_request(&client).build().unwrap();
        let values: Vec<_> = request.headers().get_all(CONTENT_TYPE).iter().collect();

        assert_eq!(values, vec!["text/plain"]);
        assert_eq!(request.headers()["x-trace"], "1");
    }
}
