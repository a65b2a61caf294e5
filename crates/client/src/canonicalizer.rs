use std::net::ToSocketAddrs;

use tracing::debug;

use locator_core::HostnameCanonicalizer;
use locator_errors::{LocatorError, LocatorResult};

/// 基于系统名字解析的主机名规范化
///
/// 单标签主机名在配置了域名后缀时补全为完整域名；本机名不发起网络查询；
/// 其余名字通过一次 `ToSocketAddrs` 查询确认可解析。结果统一为小写。
#[derive(Debug, Clone, Default)]
pub struct SystemHostnameCanonicalizer {
    domain_suffix: Option<String>,
    local_hostname: Option<String>,
}

impl SystemHostnameCanonicalizer {
    pub fn new(domain_suffix: Option<String>) -> Self {
        let local_hostname = hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .map(|name| name.to_ascii_lowercase());
        Self {
            domain_suffix: domain_suffix.map(|s| s.trim_start_matches('.').to_ascii_lowercase()),
            local_hostname,
        }
    }

    fn qualify(&self, host: &str) -> String {
        let host = host.to_ascii_lowercase();
        match &self.domain_suffix {
            Some(suffix) if !host.contains('.') && !suffix.is_empty() => format!("{host}.{suffix}"),
            _ => host,
        }
    }

    fn is_local(&self, host: &str) -> bool {
        let Some(local) = &self.local_hostname else {
            return false;
        };
        let short = local.split('.').next().unwrap_or(local);
        host.eq_ignore_ascii_case(local) || host.eq_ignore_ascii_case(short)
    }
}

impl HostnameCanonicalizer for SystemHostnameCanonicalizer {
    fn canonicalize(&self, host: &str) -> LocatorResult<String> {
        if host.is_empty() {
            return Err(LocatorError::host_resolution(host, "主机名为空"));
        }
        let candidate = self.qualify(host);
        if self.is_local(host) {
            debug!("主机 {} 为本机，跳过名字解析", host);
            return Ok(candidate);
        }

        let mut addrs = (candidate.as_str(), 0)
            .to_socket_addrs()
            .map_err(|e| LocatorError::host_resolution(host, e.to_string()))?;
        let addr = addrs
            .next()
            .ok_or_else(|| LocatorError::host_resolution(host, "没有可用地址"))?;
        debug!("主机 {} 解析为 {} ({})", host, candidate, addr.ip());
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_single_label() {
        let canonicalizer = SystemHostnameCanonicalizer::new(Some(".Example.COM".to_string()));
        assert_eq!(canonicalizer.qualify("Head"), "head.example.com");
        assert_eq!(canonicalizer.qualify("head.other.org"), "head.other.org");

        let bare = SystemHostnameCanonicalizer::new(None);
        assert_eq!(bare.qualify("Head"), "head");
    }

    #[test]
    fn test_localhost_resolves() {
        let canonicalizer = SystemHostnameCanonicalizer::new(None);
        assert_eq!(canonicalizer.canonicalize("LOCALHOST").unwrap(), "localhost");
    }

    #[test]
    fn test_unresolvable_host() {
        let canonicalizer = SystemHostnameCanonicalizer::new(None);
        let err = canonicalizer
            .canonicalize("no-such-host.invalid")
            .unwrap_err();
        assert!(matches!(err, LocatorError::HostResolution { .. }));
    }

    #[test]
    fn test_empty_host() {
        let canonicalizer = SystemHostnameCanonicalizer::default();
        assert!(canonicalizer.canonicalize("").is_err());
    }
}
