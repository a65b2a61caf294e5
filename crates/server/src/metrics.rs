use metrics::{counter, Counter};

/// 定位请求计数
pub struct LocateMetrics {
    requests_total: Counter,
    local_total: Counter,
    tracked_total: Counter,
    rejected_total: Counter,
}

impl LocateMetrics {
    pub fn new() -> Self {
        Self {
            requests_total: counter!("locator_locate_requests_total"),
            local_total: counter!("locator_locate_local_total"),
            tracked_total: counter!("locator_locate_tracked_total"),
            rejected_total: counter!("locator_locate_rejected_total"),
        }
    }

    pub fn record_request(&self) {
        self.requests_total.increment(1);
    }

    pub fn record_local(&self) {
        self.local_total.increment(1);
    }

    pub fn record_tracked(&self) {
        self.tracked_total.increment(1);
    }

    pub fn record_rejected(&self) {
        self.rejected_total.increment(1);
    }
}

impl Default for LocateMetrics {
    fn default() -> Self {
        Self::new()
    }
}
