// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::{
    path::Path,
    sync::atomic::{AtomicU64, Ordering},
};

use log::{debug, trace, warn};
use serde::{Serialize, de::DeserializeOwned};

use super::adapter_config::{AdapterConfig, RequestIdMode};
use super::envelope::{BLANK_PAGE_ERROR, HEADER_CONTENT_TYPE, RequestEnvelope, STATIC_REQUEST_ID};
use super::error::{FactomApiError, FactomApiResult};
use super::transport::{HttpMethod, TransportOptions, TransportOverrides, UnsupportedMethod};
use super::types::CallResult;
use crate::logging::redact_url;

/// JSON-RPC adapter for a single factomd endpoint.
///
/// The adapter only holds validated configuration, so one instance can be
/// reused for any number of independent calls. Every call builds its own
/// transport handle and drops it before returning.
///
/// # Example
///
/// ```rust,no_run
/// use factom_api::http::{FactomApiAdapter, TransportOverrides};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), anyhow::Error> {
/// let adapter = FactomApiAdapter::new("http://localhost:8088/v2", None, None, None)?;
///
/// let head = adapter
///     .call(
///         "chain-head",
///         "POST",
///         &json!({"chainid": "954d5a49fd70d9b8bcdb35d252267829957f7ef7fa6c74f88419bdc5e82209f4"}),
///         TransportOverrides::default(),
///         true,
///     )
///     .await?;
/// println!("{:?}", head.as_value());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FactomApiAdapter {
    config: AdapterConfig,
    next_id: AtomicU64,
}

impl FactomApiAdapter {
    /// Validates the arguments and creates an adapter.
    ///
    /// # Errors
    ///
    /// - [`FactomApiError::Configuration`] for a missing host, a certificate
    ///   with a non-https host, a missing certificate file or partial
    ///   credentials.
    /// - [`FactomApiError::Environment`] if no HTTP client can be created.
    pub fn new(
        host: &str,
        cert_path: Option<&Path>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> FactomApiResult<Self> {
        let config = AdapterConfig::new(host, cert_path, username, password)?;
        Self::with_config(config)
    }

    /// Creates an adapter from already validated settings.
    pub fn with_config(config: AdapterConfig) -> FactomApiResult<Self> {
        // Build one client up front so an unusable TLS backend surfaces here
        // rather than on the first call.
        reqwest::Client::builder()
            .build()
            .map_err(|e| FactomApiError::Environment(e.to_string()))?;

        debug!(
            host:% = redact_url(config.host()),
            tls_cert = config.cert_path().is_some(),
            auth = config.credentials().is_some();
            "Factom API adapter created"
        );

        Ok(Self {
            config,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn request_id(&self) -> u64 {
        match self.config.request_ids() {
            RequestIdMode::Static => STATIC_REQUEST_ID,
            RequestIdMode::Sequential => self.next_id.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Builds the options for one request without touching the network.
    ///
    /// # Errors
    ///
    /// - [`FactomApiError::InvalidMethod`] unless `method` is `GET` or `POST`
    ///   (any case).
    /// - [`FactomApiError::Encode`] if `params` cannot be serialized.
    pub fn gather_transport_options<P: Serialize>(
        &self,
        action: &str,
        method: &str,
        params: &P,
        overrides: TransportOverrides,
    ) -> FactomApiResult<TransportOptions> {
        let http_method = method
            .parse::<HttpMethod>()
            .map_err(|UnsupportedMethod(method)| FactomApiError::InvalidMethod {
                action: action.to_string(),
                method,
            })?;
        let body = RequestEnvelope::new(self.request_id(), action, params)
            .to_json()
            .map_err(|source| FactomApiError::Encode {
                action: action.to_string(),
                source,
            })?;

        let base = TransportOptions {
            url: self.config.host().clone(),
            http_method,
            content_type: HEADER_CONTENT_TYPE.to_string(),
            body,
            timeout: self.config.timeout(),
            basic_auth: self.config.credentials().cloned(),
            verify_peer: true,
            root_certificate: self.config.cert_path().map(Path::to_path_buf),
            extra_headers: Vec::new(),
        };

        Ok(overrides.apply(base))
    }

    /// Calls `action` on the node.
    ///
    /// With `as_obj` the body is decoded into a [`serde_json::Value`],
    /// otherwise it is returned untouched.
    ///
    /// # Errors
    ///
    /// - [`FactomApiError::InvalidMethod`] before any network activity.
    /// - [`FactomApiError::Call`] on transport failure, when the node
    ///   answers with the blank-page sentinel, or when the body is not UTF-8.
    /// - [`FactomApiError::EmptyResponse`] when the body is empty.
    /// - [`FactomApiError::Decode`] when `as_obj` is set and the body is not JSON.
    pub async fn call<P: Serialize>(
        &self,
        action: &str,
        method: &str,
        params: &P,
        overrides: TransportOverrides,
        as_obj: bool,
    ) -> FactomApiResult<CallResult> {
        let body = self.fetch(action, method, params, overrides).await?;

        if as_obj {
            let value = serde_json::from_str(&body).map_err(|source| FactomApiError::Decode {
                action: action.to_string(),
                source,
            })?;
            Ok(CallResult::Object(value))
        } else {
            Ok(CallResult::Raw(body))
        }
    }

    /// POSTs `action` and returns the decoded JSON body.
    pub async fn call_json<P: Serialize>(&self, action: &str, params: &P) -> FactomApiResult<serde_json::Value> {
        self.call_as(action, params).await
    }

    /// POSTs `action` and decodes the body into `T`.
    pub async fn call_as<T: DeserializeOwned, P: Serialize>(&self, action: &str, params: &P) -> FactomApiResult<T> {
        let body = self
            .fetch(action, HttpMethod::Post.as_str(), params, TransportOverrides::default())
            .await?;
        serde_json::from_str(&body).map_err(|source| FactomApiError::Decode {
            action: action.to_string(),
            source,
        })
    }

    async fn fetch<P: Serialize>(
        &self,
        action: &str,
        method: &str,
        params: &P,
        overrides: TransportOverrides,
    ) -> FactomApiResult<String> {
        let options = self.gather_transport_options(action, method, params, overrides)?;

        debug!(
            action = action,
            method = options.http_method.as_str(),
            host:% = redact_url(&options.url);
            "Factom API: sending request"
        );

        let body = match execute(&options).await {
            Ok(body) => body,
            Err(message) => {
                return Err(FactomApiError::Call {
                    action: action.to_string(),
                    message,
                });
            },
        };

        if body.eq_ignore_ascii_case(BLANK_PAGE_ERROR.as_bytes()) {
            return Err(FactomApiError::Call {
                action: action.to_string(),
                message: BLANK_PAGE_ERROR.to_string(),
            });
        }

        if body.is_empty() {
            return Err(FactomApiError::EmptyResponse {
                action: action.to_string(),
            });
        }

        trace!(action = action, bytes = body.len(); "Factom API: response received");

        // No BOM stripping or charset transcoding: the body goes back as sent.
        String::from_utf8(body).map_err(|e| FactomApiError::Call {
            action: action.to_string(),
            message: format!("Response is not valid UTF-8: {}", e),
        })
    }
}

/// Runs one request and returns the raw body bytes or the transport error text.
///
/// The client is created here and dropped on every return path.
async fn execute(options: &TransportOptions) -> Result<Vec<u8>, String> {
    let client = options.build_client().await?;

    let response = options
        .build_request(&client)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(); "Factom API: node answered with a non-success status");
    }

    let body = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(body.to_vec())
}
