use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::info;

use locator_client::{starting_index, DestinationResolver, Resolution, SystemHostnameCanonicalizer};
use locator_config::{AppConfig, ServerInstance};
use locator_core::HostnameCanonicalizer;
use locator_server::{BatchReply, LocateRequest, ServerSnapshot};

/// 主应用程序
pub struct Application {
    config: AppConfig,
    canonicalizer: Arc<dyn HostnameCanonicalizer>,
}

impl Application {
    /// 使用系统域名解析创建应用实例
    pub fn new(config: AppConfig) -> Self {
        let canonicalizer = Arc::new(SystemHostnameCanonicalizer::new(
            config.client.domain_suffix.clone(),
        ));
        Self::with_canonicalizer(config, canonicalizer)
    }

    pub fn with_canonicalizer(
        config: AppConfig,
        canonicalizer: Arc<dyn HostnameCanonicalizer>,
    ) -> Self {
        Self {
            config,
            canonicalizer,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn resolver(&self) -> Result<DestinationResolver> {
        DestinationResolver::from_config(&self.config.client, Arc::clone(&self.canonicalizer))
            .context("创建目的服务器解析器失败")
    }

    /// 解析作业标识的规范形式与目的服务器
    pub fn resolve(&self, job_id: &str) -> Result<Resolution> {
        let resolver = self.resolver()?;
        info!(
            "默认服务器: {}",
            resolver.default_server().unwrap_or("<未配置>")
        );
        resolver
            .resolve(job_id)
            .with_context(|| format!("解析作业标识失败: {job_id}"))
    }

    /// 多服务器部署中应当首先尝试的服务器实例，未配置实例或没有匹配时为 `None`
    pub fn starting_server(&self, job_id: &str) -> Result<Option<&ServerInstance>> {
        let servers = &self.config.client.servers;
        if servers.is_empty() {
            return Ok(None);
        }
        let resolver = self.resolver()?;
        let index = starting_index(
            &resolver,
            job_id,
            servers,
            self.config.client.batch_service_port,
        );
        Ok(index.and_then(|i| servers.get(i)))
    }

    /// 基于服务器快照回答一次定位请求
    ///
    /// 拒绝也是正常应答，只有快照装载失败或服务内部错误才返回 `Err`。
    pub async fn locate(&self, job_id: &str, snapshot_path: &Path) -> Result<BatchReply> {
        let snapshot = ServerSnapshot::from_file(snapshot_path)
            .with_context(|| format!("装载快照失败: {}", snapshot_path.display()))?;
        let service = snapshot.into_service(
            &self.config.server.server_name,
            self.config.server.tracking_capacity,
        )?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        service.handle(&LocateRequest::new(job_id), &tx)?;
        drop(tx);

        rx.recv().await.context("定位服务没有返回应答")
    }
}
