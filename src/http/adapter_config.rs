// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use url::Url;

use super::envelope::DEFAULT_TIMEOUT_SECS;
use super::error::{FactomApiError, FactomApiResult};

/// How the `id` field of outgoing JSON-RPC envelopes is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestIdMode {
    /// Every envelope carries id `0`.
    #[default]
    Static,
    /// Ids are taken from a per-adapter counter starting at `1`.
    Sequential,
}

/// Basic-auth credentials for factomd.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

/// Validated connection settings for a [`FactomApiAdapter`](super::FactomApiAdapter).
///
/// The only way to obtain one is [`AdapterConfig::new`], which checks every
/// construction rule up front, so holding an `AdapterConfig` means the
/// settings are usable.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    host: Url,
    cert_path: Option<PathBuf>,
    credentials: Option<Credentials>,
    timeout: Duration,
    request_ids: RequestIdMode,
}

impl AdapterConfig {
    /// Validates and builds the adapter settings.
    ///
    /// # Errors
    ///
    /// Returns [`FactomApiError::Configuration`] when:
    /// - `host` is empty or not an absolute `http`/`https` URL
    /// - `cert_path` is given but `host` does not use `https`
    /// - `cert_path` does not point at an existing file
    /// - only one of `username` / `password` is given
    ///
    /// Empty strings for `username` or `password` count as absent.
    pub fn new(
        host: &str,
        cert_path: Option<&Path>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> FactomApiResult<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(FactomApiError::Configuration(
                "The Factom API requires a host to be defined".to_string(),
            ));
        }

        let url = Url::parse(host)
            .map_err(|e| FactomApiError::Configuration(format!("Host \"{}\" is not a valid URL: {}", host, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(FactomApiError::Configuration(format!(
                "Host \"{}\" must use the http or https scheme",
                host
            )));
        }

        if let Some(cert) = cert_path {
            // Url lowercases the scheme while parsing.
            if url.scheme() != "https" {
                return Err(FactomApiError::Configuration(
                    "When defining a certificate, the host must use HTTPS".to_string(),
                ));
            }
            if !cert.is_file() {
                return Err(FactomApiError::Configuration(format!(
                    "Can't find provided certificate file {}",
                    cert.display()
                )));
            }
        }

        let username = username.filter(|u| !u.is_empty());
        let password = password.filter(|p| !p.is_empty());
        let credentials = match (username, password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            (None, None) => None,
            (Some(_), None) => {
                return Err(FactomApiError::Configuration(
                    "You must provide a password with a username".to_string(),
                ));
            },
            (None, Some(_)) => {
                return Err(FactomApiError::Configuration(
                    "You must provide a username with a password".to_string(),
                ));
            },
        };

        Ok(Self {
            host: url,
            cert_path: cert_path.map(Path::to_path_buf),
            credentials,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            request_ids: RequestIdMode::default(),
        })
    }

    /// Replaces the default 10 second request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_request_ids(mut self, mode: RequestIdMode) -> Self {
        self.request_ids = mode;
        self
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    pub fn cert_path(&self) -> Option<&Path> {
        self.cert_path.as_deref()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn request_ids(&self) -> RequestIdMode {
        self.request_ids
    }
}
