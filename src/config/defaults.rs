use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::cli::NodeArgs;
use crate::http::{AdapterConfig, DEFAULT_TIMEOUT_SECS, FactomApiError, FactomApiResult, RequestIdMode};

/// The `[node]` table of the configuration file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    pub host: String,
    pub cert_path: Option<PathBuf>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
    pub sequential_request_ids: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:8088/v2".to_string(),
            cert_path: None,
            username: None,
            password: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            sequential_request_ids: false,
        }
    }
}

impl NodeConfig {
    pub fn main_key_prefix() -> &'static str {
        "node"
    }

    /// Command line flags win over file and environment values.
    pub fn apply_node(&mut self, args: &NodeArgs) {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(cert_path) = &args.cert_path {
            self.cert_path = Some(cert_path.clone());
        }
        if let Some(username) = &args.username {
            self.username = Some(username.clone());
        }
        if let Some(password) = &args.password {
            self.password = Some(password.clone());
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
    }

    /// Validates the settings and turns them into an [`AdapterConfig`].
    ///
    /// A `timeout_secs` of zero is rejected, since every request would time
    /// out immediately.
    pub fn to_adapter_config(&self) -> FactomApiResult<AdapterConfig> {
        if self.timeout_secs == 0 {
            return Err(FactomApiError::Configuration(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        let request_ids = if self.sequential_request_ids {
            RequestIdMode::Sequential
        } else {
            RequestIdMode::Static
        };

        Ok(AdapterConfig::new(
            &self.host,
            self.cert_path.as_deref(),
            self.username.as_deref(),
            self.password.as_deref(),
        )?
        .with_timeout(Duration::from_secs(self.timeout_secs))
        .with_request_ids(request_ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_produce_valid_adapter_config() {
        let config = NodeConfig::default().to_adapter_config().unwrap();
        assert_eq!(config.host().as_str(), "http://localhost:8088/v2");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.request_ids(), RequestIdMode::Static);
    }

    #[test]
    fn test_args_override_file_values() {
        let mut config = NodeConfig {
            username: Some("from-file".to_string()),
            password: Some("file-secret".to_string()),
            ..NodeConfig::default()
        };
        let args = NodeArgs {
            host: Some("https://node.example.com/v2".to_string()),
            username: Some("from-cli".to_string()),
            timeout_secs: Some(3),
            ..NodeArgs::default()
        };

        config.apply_node(&args);

        assert_eq!(config.host, "https://node.example.com/v2");
        assert_eq!(config.username.as_deref(), Some("from-cli"));
        assert_eq!(config.password.as_deref(), Some("file-secret"));
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_partial_credentials_fail_validation() {
        let config = NodeConfig {
            username: Some("factom".to_string()),
            ..NodeConfig::default()
        };
        assert!(matches!(config.to_adapter_config(), Err(FactomApiError::Configuration(_))));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = NodeConfig::default();
        config.apply_node(&NodeArgs {
            timeout_secs: Some(0),
            ..NodeArgs::default()
        });

        match config.to_adapter_config() {
            Err(FactomApiError::Configuration(reason)) => assert!(reason.contains("timeout_secs")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_sequential_ids_flag() {
        let config = NodeConfig {
            sequential_request_ids: true,
            ..NodeConfig::default()
        };
        assert_eq!(
            config.to_adapter_config().unwrap().request_ids(),
            RequestIdMode::Sequential
        );
    }
}
