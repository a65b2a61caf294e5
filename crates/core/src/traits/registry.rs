//! 定位服务依赖的只读数据源
//!
//! - `JobRegistry` 实时作业表，按作业标识查找
//! - `TrackingLookup` 跟踪表，记录已离开本服务器的作业位置
//!
//! 两者都以 `Arc<dyn ...>` 注入定位服务，测试时可以替换为内存实现。

use locator_errors::LocatorResult;

use crate::models::LiveJobRecord;

pub trait JobRegistry: Send + Sync {
    fn find_job(&self, job_id: &str) -> LocatorResult<Option<LiveJobRecord>>;
}

pub trait TrackingLookup: Send + Sync {
    /// 按槽位顺序扫描，返回第一个匹配的非空记录的位置
    fn find_location(&self, key: &str) -> LocatorResult<Option<String>>;

    fn capacity(&self) -> usize;
}
