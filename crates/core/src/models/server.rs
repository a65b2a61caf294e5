use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use locator_errors::{LocatorError, LocatorResult};

use crate::limits::{MAX_PORT_DIGITS, MAX_SERVER_NAME_LEN};

/// `host[:port]` 形式的服务器名
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerName {
    pub host: String,
    pub port: Option<u16>,
}

impl ServerName {
    pub fn new<S: Into<String>>(host: S, port: Option<u16>) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// 解析服务器名，`context` 为出错时报告的完整作业标识
    pub fn parse(text: &str, context: &str) -> LocatorResult<Self> {
        let (host, port) = match text.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (text, None),
        };
        validate_host(host, context)?;
        let port = port.map(|p| parse_port(p, context)).transpose()?;
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    /// 忽略大小写比较主机名，端口必须一致
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.to_string().eq_ignore_ascii_case(other)
    }
}

fn validate_host(host: &str, context: &str) -> LocatorResult<()> {
    let Some(first) = host.chars().next() else {
        return Err(LocatorError::malformed_id(context, "服务器名为空"));
    };
    if host.len() > MAX_SERVER_NAME_LEN {
        return Err(LocatorError::malformed_id(
            context,
            format!("服务器名超过 {MAX_SERVER_NAME_LEN} 字节"),
        ));
    }
    if !first.is_ascii_alphanumeric() {
        return Err(LocatorError::malformed_id(
            context,
            format!("服务器名必须以字母或数字开头: {host}"),
        ));
    }
    if let Some(bad) = host
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(LocatorError::malformed_id(
            context,
            format!("服务器名包含非法字符 {bad:?}"),
        ));
    }
    Ok(())
}

fn parse_port(port: &str, context: &str) -> LocatorResult<u16> {
    let valid_digits = !port.is_empty()
        && port.len() <= MAX_PORT_DIGITS
        && port.bytes().all(|b| b.is_ascii_digit())
        && !port.starts_with('0');
    if !valid_digits {
        return Err(LocatorError::malformed_id(
            context,
            format!("端口号无效: {port}"),
        ));
    }
    port.parse::<u16>()
        .map_err(|_| LocatorError::malformed_id(context, format!("端口号超出范围: {port}")))
}

impl FromStr for ServerName {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, s)
    }
}

impl fmt::Display for ServerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.host, port),
            None => write!(f, "{}", self.host),
        }
    }
}
