use tracing::debug;

use locator_config::ServerInstance;
use locator_core::ServerName;
use locator_errors::{LocatorError, LocatorResult};

use crate::DestinationResolver;

/// 拆分 `host[:port]`，未携带端口时使用默认端口
pub fn split_server_id(server_id: &str, default_port: u16) -> LocatorResult<(String, u16)> {
    if server_id.is_empty() {
        return Err(LocatorError::invalid_argument("服务器标识"));
    }
    let name = ServerName::parse(server_id, server_id)?;
    Ok((name.host, name.port.unwrap_or(default_port)))
}

/// 多服务器部署中，根据作业标识选择首先尝试的服务器实例下标
///
/// 解析失败或没有匹配的实例时返回 `None`，调用方按常规顺序尝试。
pub fn starting_index(
    resolver: &DestinationResolver,
    job_id: &str,
    servers: &[ServerInstance],
    default_port: u16,
) -> Option<usize> {
    let resolution = match resolver.resolve(job_id) {
        Ok(resolution) => resolution,
        Err(e) => {
            debug!("作业 {} 无法确定起始服务器: {}", job_id, e);
            return None;
        }
    };
    let target = if resolution.uses_default_routing() {
        resolver.default_server()?
    } else {
        resolution.destination()
    };
    let (host, port) = split_server_id(target, default_port).ok()?;
    let index = servers
        .iter()
        .position(|server| server.name == host && server.port == port);
    debug!("作业 {} 的起始服务器: {:?}", job_id, index);
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use locator_config::CanonicalIdPolicy;
    use locator_testing_utils::StaticCanonicalizer;

    fn servers() -> Vec<ServerInstance> {
        vec![
            ServerInstance::new("clusterA", 15001),
            ServerInstance::new("clusterB", 15001),
            ServerInstance::new("clusterB", 15002),
        ]
    }

    fn resolver() -> DestinationResolver {
        DestinationResolver::new(
            Some("clusterA".to_string()),
            CanonicalIdPolicy::Literal,
            Arc::new(StaticCanonicalizer::identity()),
        )
    }

    #[test]
    fn test_split_server_id() {
        assert_eq!(
            split_server_id("clusterB:15002", 15001).unwrap(),
            ("clusterB".to_string(), 15002)
        );
        assert_eq!(
            split_server_id("clusterB", 15001).unwrap(),
            ("clusterB".to_string(), 15001)
        );
        assert!(matches!(
            split_server_id("", 15001),
            Err(LocatorError::InvalidArgument(_))
        ));
        assert!(split_server_id("clusterB:x", 15001).is_err());
    }

    #[test]
    fn test_starting_index() {
        let resolver = resolver();
        let servers = servers();
        assert_eq!(starting_index(&resolver, "42", &servers, 15001), Some(0));
        assert_eq!(starting_index(&resolver, "42@clusterB", &servers, 15001), Some(1));
        assert_eq!(
            starting_index(&resolver, "42@clusterB:15002", &servers, 15001),
            Some(2)
        );
        assert_eq!(starting_index(&resolver, "42.clusterC", &servers, 15001), None);
        assert_eq!(starting_index(&resolver, "bad id", &servers, 15001), None);
    }
}
