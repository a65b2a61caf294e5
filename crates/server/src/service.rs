use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use locator_core::limits::MAX_CLIENT_JOB_ID_LEN;
use locator_core::{tracking_key, JobRegistry, TrackingLookup};
use locator_errors::{LocatorError, LocatorResult};

use crate::metrics::LocateMetrics;
use crate::reply::{BatchReply, LocateRequest, ReplyChannel};

/// 回答"作业现在在哪台服务器上"
///
/// 实时作业表和跟踪表都通过构造参数注入，服务本身不持有任何可变状态。
pub struct LocationService {
    server_name: String,
    registry: Arc<dyn JobRegistry>,
    tracking: Arc<dyn TrackingLookup>,
    metrics: LocateMetrics,
}

impl LocationService {
    pub fn new<S: Into<String>>(
        server_name: S,
        registry: Arc<dyn JobRegistry>,
        tracking: Arc<dyn TrackingLookup>,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            registry,
            tracking,
            metrics: LocateMetrics::new(),
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// 处理一次定位请求，恰好发送一条应答
    ///
    /// 除资源耗尽等致命错误外，所有失败都转成拒绝应答并返回 `Ok(())`。
    pub fn handle(&self, request: &LocateRequest, channel: &dyn ReplyChannel) -> LocatorResult<()> {
        match self.locate(&request.job_id) {
            Ok(location) => channel.send(BatchReply::locate(location)),
            Err(e) => {
                let reply = BatchReply::reject(e.code());
                if e.is_fatal() {
                    error!("定位作业 {} 时发生致命错误: {}", request.job_id, e);
                    channel.send(reply)?;
                    return Err(e);
                }
                warn!("拒绝定位请求 {}: {}", request.job_id, e);
                channel.send(reply)
            }
        }
    }

    /// 查找作业所在服务器，只读
    #[instrument(skip(self), fields(server = %self.server_name))]
    pub fn locate(&self, job_id: &str) -> LocatorResult<String> {
        self.metrics.record_request();
        let result = self.lookup(job_id);
        if result.is_err() {
            self.metrics.record_rejected();
        }
        result
    }

    fn lookup(&self, job_id: &str) -> LocatorResult<String> {
        if job_id.is_empty() {
            return Err(LocatorError::invalid_argument("作业标识"));
        }
        if job_id.len() > MAX_CLIENT_JOB_ID_LEN {
            return Err(LocatorError::malformed_id(
                job_id,
                format!("长度超过 {MAX_CLIENT_JOB_ID_LEN}"),
            ));
        }

        // `@server` 只是客户端的路由提示
        let stripped = job_id.split_once('@').map_or(job_id, |(id, _)| id);
        // 不带服务器后缀的标识属于本服务器，两张表都按完整标识查找
        let qualified = if stripped.contains('.') {
            None
        } else {
            Some(format!("{stripped}.{}", self.server_name))
        };
        let key = qualified.as_deref().unwrap_or(stripped);

        if let Some(job) = self.registry.find_job(key)? {
            if job.is_history() {
                return Err(LocatorError::history_job(key));
            }
            if !job.is_moved() {
                debug!("作业 {} 在本服务器上", key);
                self.metrics.record_local();
                return Ok(self.server_name.clone());
            }
            debug!("作业 {} 已迁出，查询跟踪表", key);
        }

        let lookup_key = tracking_key(key);
        match self.tracking.find_location(&lookup_key)? {
            Some(location) => {
                info!("作业 {} 的跟踪位置: {}", lookup_key, location);
                self.metrics.record_tracked();
                Ok(location)
            }
            None => Err(LocatorError::unknown_job(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locator_testing_utils::{LiveJobBuilder, MockJobRegistry, MockTrackingLookup, TrackingRecordBuilder};

    fn service(registry: MockJobRegistry, tracking: MockTrackingLookup) -> LocationService {
        LocationService::new("clusterA", Arc::new(registry), Arc::new(tracking))
    }

    #[test]
    fn test_routing_hint_is_ignored() {
        let registry =
            MockJobRegistry::with_jobs(vec![LiveJobBuilder::new("42.clusterA").running().build()]);
        let svc = service(registry, MockTrackingLookup::default());
        assert_eq!(svc.locate("42.clusterA@clusterB").unwrap(), "clusterA");
    }

    #[test]
    fn test_empty_and_overlong_ids() {
        let svc = service(MockJobRegistry::new(), MockTrackingLookup::default());
        assert!(matches!(svc.locate(""), Err(LocatorError::InvalidArgument(_))));
        let long = "1".repeat(MAX_CLIENT_JOB_ID_LEN + 1);
        assert!(matches!(svc.locate(&long), Err(LocatorError::MalformedId { .. })));
    }

    #[test]
    fn test_short_id_is_qualified_for_both_lookups() {
        let registry = MockJobRegistry::with_jobs(vec![
            LiveJobBuilder::new("42.clusterA").running().build(),
            LiveJobBuilder::new("43.clusterA").moved().build(),
        ]);
        let tracking = MockTrackingLookup::new(vec![
            TrackingRecordBuilder::new("43.clusterA", "clusterB").build(),
            TrackingRecordBuilder::new("44.clusterA", "clusterC").build(),
            TrackingRecordBuilder::new("7[].clusterA", "clusterD").build(),
        ]);
        let svc = service(registry, tracking);
        assert_eq!(svc.locate("42").unwrap(), "clusterA");
        assert_eq!(svc.locate("43").unwrap(), "clusterB");
        assert_eq!(svc.locate("43.clusterA").unwrap(), "clusterB");
        assert_eq!(svc.locate("44@clusterZ").unwrap(), "clusterC");
        assert_eq!(svc.locate("7[5]").unwrap(), "clusterD");
        match svc.locate("45") {
            Err(LocatorError::UnknownJobId { id }) => assert_eq!(id, "45.clusterA"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_moved_job_falls_through_to_tracking() {
        let registry =
            MockJobRegistry::with_jobs(vec![LiveJobBuilder::new("9.clusterA").moved().build()]);
        let tracking =
            MockTrackingLookup::new(vec![TrackingRecordBuilder::new("9.clusterA", "clusterC").build()]);
        let svc = service(registry, tracking);
        assert_eq!(svc.locate("9.clusterA").unwrap(), "clusterC");
    }
}
