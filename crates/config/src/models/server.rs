use crate::validation::{ConfigValidator, ValidationUtils};
use serde::{Deserialize, Serialize};

/// 跟踪表容量上限
pub const MAX_TRACKING_CAPACITY: usize = 1_000_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// 本服务器的规范名称，定位本地作业时直接返回
    pub server_name: String,
    pub tracking_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: "localhost".to_string(),
            tracking_capacity: 1024,
        }
    }
}

impl ConfigValidator for ServerConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_server_name(&self.server_name, "server.server_name")?;
        ValidationUtils::validate_count(
            self.tracking_capacity,
            "server.tracking_capacity",
            MAX_TRACKING_CAPACITY,
        )?;
        Ok(())
    }
}
