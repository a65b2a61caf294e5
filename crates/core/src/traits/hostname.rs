use locator_errors::LocatorResult;

/// 将部分主机名解析为完整主机名
///
/// 实现可以发起一次阻塞的名字解析调用，失败时返回 `HostResolution`。
pub trait HostnameCanonicalizer: Send + Sync {
    fn canonicalize(&self, host: &str) -> LocatorResult<String>;
}
