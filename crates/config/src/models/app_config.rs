use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{client::ClientConfig, logging::LogConfig, server::ServerConfig};
use crate::validation::ConfigValidator;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub server: ServerConfig,
    pub logging: LogConfig,
}

impl AppConfig {
    /// 依次叠加：内置默认值、TOML 配置文件、`LOCATOR_` 前缀环境变量
    ///
    /// 环境变量使用 `__` 分隔层级，例如 `LOCATOR_SERVER__SERVER_NAME`。
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder()
            .set_default("client.batch_service_port", 15001)?
            .set_default("client.canonical_id_policy", "literal")?
            .set_default("server.server_name", "localhost")?
            .set_default("server.tracking_capacity", 1024)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?;

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(anyhow::anyhow!("配置文件不存在: {}", path));
            }
        } else {
            let default_paths = [
                "config/locator.toml",
                "locator.toml",
                "/etc/batch-locator/config.toml",
            ];
            if let Some(path) = default_paths.iter().find(|p| Path::new(p).exists()) {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("LOCATOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .context("构建配置失败")?
            .try_deserialize()
            .context("反序列化配置失败")?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("解析TOML配置失败")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("序列化配置为TOML失败")
    }
}

impl ConfigValidator for AppConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        self.client.validate()?;
        self.server.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CanonicalIdPolicy, LogLevel, OutputFormat};
    use std::io::Write;

    const SAMPLE: &str = r#"
[client]
default_server = "clusterA"
canonical_id_policy = "resolved"
domain_suffix = "example.com"

[[client.servers]]
name = "clusterA"
port = 15001

[[client.servers]]
name = "clusterB"
port = 15002

[server]
server_name = "clusterA.example.com"
tracking_capacity = 64

[logging]
level = "debug"
format = "json"
"#;

    #[test]
    fn test_from_toml() {
        let config = AppConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.client.default_server.as_deref(), Some("clusterA"));
        assert_eq!(config.client.canonical_id_policy, CanonicalIdPolicy::Resolved);
        assert_eq!(config.client.servers.len(), 2);
        assert_eq!(config.client.batch_service_port, 15001);
        assert_eq!(config.server.tracking_capacity, 64);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, OutputFormat::Json);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::from_toml(SAMPLE).unwrap();
        let serialized = config.to_toml().unwrap();
        let reparsed = AppConfig::from_toml(&serialized).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        let invalid = "[server]\nserver_name = \"\"\n";
        assert!(AppConfig::from_toml(invalid).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = AppConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.server.server_name, "clusterA.example.com");
        assert_eq!(config.client.domain_suffix.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(AppConfig::load(Some("/nonexistent/locator.toml")).is_err());
    }
}
