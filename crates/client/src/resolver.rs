use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use locator_config::{CanonicalIdPolicy, ClientConfig};
use locator_core::{CanonicalJobId, HostnameCanonicalizer, JobIdentifier, ServerName};
use locator_errors::{LocatorError, LocatorResult};

/// 一次解析的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub canonical_id: CanonicalJobId,
    /// 空串表示走调用方的默认服务器路径
    pub destination: String,
    /// 用户提供的父服务器原文
    pub parent_literal: Option<String>,
    /// 父服务器解析后的完整名称，与默认服务器相同时不做解析
    pub parent_resolved: Option<String>,
}

impl Resolution {
    pub fn canonical_id(&self) -> &str {
        self.canonical_id.as_str()
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn uses_default_routing(&self) -> bool {
        self.destination.is_empty()
    }
}

pub struct DestinationResolver {
    default_server: Option<String>,
    policy: CanonicalIdPolicy,
    canonicalizer: Arc<dyn HostnameCanonicalizer>,
}

impl DestinationResolver {
    pub fn new(
        default_server: Option<String>,
        policy: CanonicalIdPolicy,
        canonicalizer: Arc<dyn HostnameCanonicalizer>,
    ) -> Self {
        Self {
            default_server,
            policy,
            canonicalizer,
        }
    }

    /// 按配置发现默认服务器后构造解析器
    pub fn from_config(
        config: &ClientConfig,
        canonicalizer: Arc<dyn HostnameCanonicalizer>,
    ) -> LocatorResult<Self> {
        let default_server = config
            .discover_default_server()
            .map_err(|e| LocatorError::config_error(e.to_string()))?;
        Ok(Self::new(
            default_server,
            config.canonical_id_policy,
            canonicalizer,
        ))
    }

    pub fn default_server(&self) -> Option<&str> {
        self.default_server.as_deref()
    }

    pub fn policy(&self) -> CanonicalIdPolicy {
        self.policy
    }

    /// 依次应用以下规则：
    ///
    /// 1. `@server` 一旦出现即决定目的服务器
    /// 2. 父服务器与默认服务器相同（忽略大小写）时，规范标识使用配置中的写法
    /// 3. 其他父服务器必须能解析，目的服务器为父服务器原文
    /// 4. 没有父服务器时使用默认服务器，未配置则失败
    pub fn resolve(&self, raw: &str) -> LocatorResult<Resolution> {
        if raw.is_empty() {
            return Err(LocatorError::invalid_argument("作业标识"));
        }
        let id = JobIdentifier::parse(raw)?;
        let sequence = id.sequence();

        let destination = id
            .current_server
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        if !destination.is_empty() {
            debug!("作业 {} 指定了当前服务器: {}", raw, destination);
        }

        if let Some(parent) = &id.parent_server {
            return self.resolve_with_parent(raw, &sequence, parent, destination);
        }

        let Some(default_server) = &self.default_server else {
            debug!("作业 {} 未指定父服务器且没有默认服务器", raw);
            return Err(LocatorError::NoDefaultServer);
        };
        let canonical_id = CanonicalJobId::new(&sequence, default_server)?;
        debug!("作业 {} 使用默认服务器，规范标识: {}", raw, canonical_id);

        Ok(Resolution {
            canonical_id,
            destination,
            parent_literal: None,
            parent_resolved: None,
        })
    }

    fn resolve_with_parent(
        &self,
        raw: &str,
        sequence: &str,
        parent: &ServerName,
        mut destination: String,
    ) -> LocatorResult<Resolution> {
        let parent_literal = parent.to_string();

        if let Some(default_server) = &self.default_server {
            if parent.eq_ignore_case(default_server) {
                let canonical_id = CanonicalJobId::new(sequence, default_server)?;
                debug!(
                    "作业 {} 的父服务器即默认服务器，规范标识: {}",
                    raw, canonical_id
                );
                return Ok(Resolution {
                    canonical_id,
                    destination,
                    parent_literal: Some(parent_literal),
                    parent_resolved: None,
                });
            }
        }

        let resolved_host = self.canonicalizer.canonicalize(&parent.host)?;
        let parent_resolved = ServerName::new(resolved_host, parent.port).to_string();
        if parent_resolved != parent_literal {
            debug!(
                "父服务器 {} 解析为 {}，按 {:?} 策略生成规范标识",
                parent_literal, parent_resolved, self.policy
            );
        }

        let suffix = match self.policy {
            CanonicalIdPolicy::Literal => &parent_literal,
            CanonicalIdPolicy::Resolved => &parent_resolved,
        };
        let canonical_id = CanonicalJobId::new(sequence, suffix)?;
        if destination.is_empty() {
            destination = parent_literal.clone();
        }
        debug!(
            "作业 {} 解析完成，规范标识: {}，目的服务器: {}",
            raw, canonical_id, destination
        );

        Ok(Resolution {
            canonical_id,
            destination,
            parent_literal: Some(parent_literal),
            parent_resolved: Some(parent_resolved),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locator_testing_utils::{FailingCanonicalizer, StaticCanonicalizer};

    fn resolver(default_server: Option<&str>) -> DestinationResolver {
        DestinationResolver::new(
            default_server.map(str::to_string),
            CanonicalIdPolicy::Literal,
            Arc::new(StaticCanonicalizer::identity()),
        )
    }

    #[test]
    fn test_sequence_only_uses_default() {
        let resolution = resolver(Some("clusterA")).resolve("42").unwrap();
        assert_eq!(resolution.canonical_id(), "42.clusterA");
        assert_eq!(resolution.destination(), "");
        assert!(resolution.uses_default_routing());
    }

    #[test]
    fn test_empty_input_is_invalid_argument() {
        let err = resolver(Some("clusterA")).resolve("").unwrap_err();
        assert!(matches!(err, LocatorError::InvalidArgument(_)));
    }

    #[test]
    fn test_no_default_server() {
        let err = resolver(None).resolve("42").unwrap_err();
        assert!(matches!(err, LocatorError::NoDefaultServer));
    }

    #[test]
    fn test_parent_resolution_failure_aborts() {
        let resolver = DestinationResolver::new(
            Some("clusterA".to_string()),
            CanonicalIdPolicy::Literal,
            Arc::new(FailingCanonicalizer),
        );
        let err = resolver.resolve("42.otherhost@clusterB").unwrap_err();
        assert!(matches!(err, LocatorError::HostResolution { .. }));

        // 父服务器即默认服务器时不做主机名解析
        let resolution = resolver.resolve("42.CLUSTERA").unwrap();
        assert_eq!(resolution.canonical_id(), "42.clusterA");
    }

    #[test]
    fn test_malformed_propagates() {
        let err = resolver(Some("clusterA")).resolve("42.@x").unwrap_err();
        assert!(matches!(err, LocatorError::MalformedId { .. }));
    }
}
