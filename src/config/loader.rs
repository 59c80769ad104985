use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, Environment};
use log::{debug, info};

use super::defaults::NodeConfig;

pub fn get_default_config() -> &'static str {
    include_str!("../../resources/config.toml")
}

/// Loads the node settings from `path`, layered with `FACTOM_*` environment
/// variables. A default file is written first when `path` does not exist.
pub fn load_configuration(path: &Path) -> Result<NodeConfig> {
    if !path.exists() {
        write_config_to(path, get_default_config()).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    let cfg = Config::builder()
        .add_source(config::File::with_name(filename))
        .add_source(Environment::with_prefix("FACTOM").prefix_separator("_").separator("__"))
        .build()
        .context("Could not build config")?;

    match cfg.get::<NodeConfig>(NodeConfig::main_key_prefix()) {
        Ok(node) => {
            debug!(path:% = path.display(); "Loaded node configuration");
            Ok(node)
        },
        Err(config::ConfigError::NotFound(_)) => Ok(NodeConfig::default()),
        Err(e) => Err(e).context("Invalid [node] configuration"),
    }
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("factom.toml");

        let node = load_configuration(&path).unwrap();

        assert!(path.exists());
        assert_eq!(node.host, "http://localhost:8088/v2");
        assert_eq!(node.timeout_secs, 10);
        assert!(!node.sequential_request_ids);
        assert!(node.username.is_none());
    }

    #[test]
    fn test_file_values_are_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("factom.toml");
        write_config_to(
            &path,
            r#"
[node]
host = "https://courtesy-node.factom.com/v2"
username = "factom"
password = "secret"
timeout_secs = 25
"#,
        )
        .unwrap();

        let node = load_configuration(&path).unwrap();

        assert_eq!(node.host, "https://courtesy-node.factom.com/v2");
        assert_eq!(node.username.as_deref(), Some("factom"));
        assert_eq!(node.password.as_deref(), Some("secret"));
        assert_eq!(node.timeout_secs, 25);
    }

    #[test]
    fn test_zero_timeout_from_file_fails_validation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("factom.toml");
        write_config_to(&path, "[node]\ntimeout_secs = 0").unwrap();

        let node = load_configuration(&path).unwrap();
        assert_eq!(node.timeout_secs, 0);
        assert!(node.to_adapter_config().is_err());
    }

    #[test]
    fn test_file_without_node_table_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("factom.toml");
        write_config_to(&path, "# nothing here").unwrap();

        let node = load_configuration(&path).unwrap();
        assert_eq!(node.host, NodeConfig::default().host);
    }
}
