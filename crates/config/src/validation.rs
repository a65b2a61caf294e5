use crate::ConfigResult;

/// Trait for configuration validation
pub trait ConfigValidator {
    fn validate(&self) -> ConfigResult<()>;
}

/// General validation utilities
pub struct ValidationUtils;

/// 与作业标识语法保持一致的主机名长度上限
pub const MAX_SERVER_NAME_LEN: usize = 255;

impl ValidationUtils {
    /// Validate that a string is not empty
    pub fn validate_not_empty(value: &str, field_name: &str) -> ConfigResult<()> {
        if value.trim().is_empty() {
            return Err(crate::ConfigError::Validation(format!(
                "{field_name} cannot be empty"
            )));
        }
        Ok(())
    }

    /// Validate that a port number is valid
    pub fn validate_port(port: u16, field_name: &str) -> ConfigResult<()> {
        if port == 0 {
            return Err(crate::ConfigError::Validation(format!(
                "{field_name} cannot be 0"
            )));
        }
        Ok(())
    }

    /// Validate that a count is within `1..=max`
    pub fn validate_count(count: usize, field_name: &str, max: usize) -> ConfigResult<()> {
        if count == 0 {
            return Err(crate::ConfigError::Validation(format!(
                "{field_name} must be greater than 0"
            )));
        }
        if count > max {
            return Err(crate::ConfigError::Validation(format!(
                "{field_name} must be less than or equal to {max}"
            )));
        }
        Ok(())
    }

    /// Validate a server name: non-empty, no whitespace, bounded length
    pub fn validate_server_name(name: &str, field_name: &str) -> ConfigResult<()> {
        Self::validate_not_empty(name, field_name)?;
        if name.chars().any(char::is_whitespace) {
            return Err(crate::ConfigError::Validation(format!(
                "{field_name} cannot contain whitespace"
            )));
        }
        let host = name.split(':').next().unwrap_or(name);
        if host.len() > MAX_SERVER_NAME_LEN {
            return Err(crate::ConfigError::Validation(format!(
                "{field_name} must be at most {MAX_SERVER_NAME_LEN} bytes"
            )));
        }
        Ok(())
    }
}
