//! 默认服务器发现
//!
//! 优先级：环境变量 `LOCATOR_DEFAULT_SERVER`，配置项 `client.default_server`，
//! 最后是管理员维护的默认目的文件中第一条非空、非注释的行。

use std::path::Path;

use tracing::debug;

use crate::{ClientConfig, ConfigError, ConfigResult, ValidationUtils};

pub const DEFAULT_SERVER_ENV: &str = "LOCATOR_DEFAULT_SERVER";

impl ClientConfig {
    /// 从进程环境与配置中确定默认服务器名
    pub fn discover_default_server(&self) -> ConfigResult<Option<String>> {
        discover_default_server(
            std::env::var(DEFAULT_SERVER_ENV).ok(),
            self.default_server.as_deref(),
            self.default_destination_file.as_deref().map(Path::new),
        )
    }
}

pub fn discover_default_server(
    env_value: Option<String>,
    configured: Option<&str>,
    destination_file: Option<&Path>,
) -> ConfigResult<Option<String>> {
    if let Some(value) = env_value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        ValidationUtils::validate_server_name(&value, DEFAULT_SERVER_ENV)?;
        debug!("使用环境变量中的默认服务器: {}", value);
        return Ok(Some(value));
    }

    if let Some(value) = configured {
        debug!("使用配置文件中的默认服务器: {}", value);
        return Ok(Some(value.to_string()));
    }

    let Some(path) = destination_file else {
        return Ok(None);
    };
    if !path.exists() {
        debug!("默认目的文件不存在: {}", path.display());
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::File(format!("读取默认目的文件失败 {}: {e}", path.display()))
    })?;
    let value = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string);
    if let Some(value) = &value {
        ValidationUtils::validate_server_name(value, "default destination file")?;
        debug!("使用默认目的文件中的默认服务器: {}", value);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn destination_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_env_wins() {
        let file = destination_file("fromfile\n");
        let server =
            discover_default_server(Some("fromenv".into()), Some("fromconfig"), Some(file.path()))
                .unwrap();
        assert_eq!(server.as_deref(), Some("fromenv"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let server = discover_default_server(Some("  ".into()), Some("fromconfig"), None).unwrap();
        assert_eq!(server.as_deref(), Some("fromconfig"));
    }

    #[test]
    fn test_destination_file_fallback() {
        let file = destination_file("# managed by admin\n\n  clusterA:15001  \nclusterB\n");
        let server = discover_default_server(None, None, Some(file.path())).unwrap();
        assert_eq!(server.as_deref(), Some("clusterA:15001"));
    }

    #[test]
    fn test_nothing_configured() {
        assert_eq!(discover_default_server(None, None, None).unwrap(), None);
        let missing = Path::new("/nonexistent/default_destination");
        assert_eq!(discover_default_server(None, None, Some(missing)).unwrap(), None);
        let empty = destination_file("# only comments\n");
        assert_eq!(discover_default_server(None, None, Some(empty.path())).unwrap(), None);
    }

    #[test]
    fn test_invalid_env_value() {
        let result = discover_default_server(Some("bad name".into()), None, None);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
