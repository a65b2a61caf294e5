use crate::validation::{ConfigValidator, ValidationUtils};
use serde::{Deserialize, Serialize};

/// 父服务器名解析成功后，规范作业标识采用哪种形式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalIdPolicy {
    /// 保留用户提供的原文
    #[default]
    Literal,
    /// 使用解析得到的完整主机名
    Resolved,
}

/// 多服务器部署中的一个服务器实例
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerInstance {
    pub name: String,
    pub port: u16,
}

impl ServerInstance {
    pub fn new<S: Into<String>>(name: S, port: u16) -> Self {
        Self {
            name: name.into(),
            port,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// 默认服务器名，未配置时回退到默认目的文件
    pub default_server: Option<String>,
    /// 管理员维护的默认目的文件，取第一行有效内容
    pub default_destination_file: Option<String>,
    pub canonical_id_policy: CanonicalIdPolicy,
    /// 单标签主机名补全使用的域名后缀
    pub domain_suffix: Option<String>,
    pub batch_service_port: u16,
    pub servers: Vec<ServerInstance>,
}

pub const DEFAULT_BATCH_SERVICE_PORT: u16 = 15001;

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_server: None,
            default_destination_file: None,
            canonical_id_policy: CanonicalIdPolicy::Literal,
            domain_suffix: None,
            batch_service_port: DEFAULT_BATCH_SERVICE_PORT,
            servers: Vec::new(),
        }
    }
}

impl ConfigValidator for ClientConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        if let Some(server) = &self.default_server {
            ValidationUtils::validate_server_name(server, "client.default_server")?;
        }
        if let Some(path) = &self.default_destination_file {
            ValidationUtils::validate_not_empty(path, "client.default_destination_file")?;
        }
        if let Some(suffix) = &self.domain_suffix {
            ValidationUtils::validate_server_name(suffix, "client.domain_suffix")?;
        }
        ValidationUtils::validate_port(self.batch_service_port, "client.batch_service_port")?;
        for server in &self.servers {
            ValidationUtils::validate_server_name(&server.name, "client.servers.name")?;
            ValidationUtils::validate_port(server.port, "client.servers.port")?;
        }
        Ok(())
    }
}
