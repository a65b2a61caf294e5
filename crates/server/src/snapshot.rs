//! 从 JSON 快照装配定位服务
//!
//! 快照记录某一时刻的实时作业表和跟踪表，供命令行离线查询与测试使用：
//!
//! ```json
//! {
//!   "server_name": "clusterA",
//!   "tracking_capacity": 16,
//!   "jobs": [{"job_id": "42.clusterA", "state": "RUNNING"}],
//!   "tracking": [{"job_id": "7[].clusterA", "location": "clusterB", "last_modified": 1717243200}]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use locator_core::{LiveJobRecord, TrackingRecord};
use locator_errors::{LocatorError, LocatorResult};

use crate::registry::InMemoryJobRegistry;
use crate::service::LocationService;
use crate::tracking_table::TrackingTable;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSnapshot {
    #[serde(default)]
    pub server_name: Option<String>,
    #[serde(default)]
    pub tracking_capacity: Option<usize>,
    #[serde(default)]
    pub jobs: Vec<LiveJobRecord>,
    /// 按槽位顺序排列
    #[serde(default)]
    pub tracking: Vec<TrackingRecord>,
}

impl ServerSnapshot {
    pub fn from_json(json: &str) -> LocatorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> LocatorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LocatorError::config_error(format!("读取快照文件 {} 失败: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// 快照里的服务器名和容量优先，缺省时使用配置值
    pub fn into_service(
        self,
        default_server_name: &str,
        default_capacity: usize,
    ) -> LocatorResult<LocationService> {
        let server_name = self
            .server_name
            .unwrap_or_else(|| default_server_name.to_string());
        let capacity = self.tracking_capacity.unwrap_or(default_capacity);

        info!(
            "装载快照: 服务器 {}, {} 个实时作业, {} 条跟踪记录 (容量 {})",
            server_name,
            self.jobs.len(),
            self.tracking.len(),
            capacity
        );

        let registry = InMemoryJobRegistry::with_jobs(self.jobs);
        let tracking = TrackingTable::from_slots(capacity, self.tracking)?;
        Ok(LocationService::new(
            server_name,
            Arc::new(registry),
            Arc::new(tracking),
        ))
    }
}
