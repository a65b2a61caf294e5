use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 跟踪表中的一条记录：作业离开本服务器后最后一次已知的位置
///
/// `last_modified == 0` 表示空槽位。记录由作业迁移子系统整体写入。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub job_id: String,
    pub location: String,
    /// Unix 秒
    pub last_modified: i64,
}

impl TrackingRecord {
    pub fn new<J, L>(job_id: J, location: L, modified_at: DateTime<Utc>) -> Self
    where
        J: Into<String>,
        L: Into<String>,
    {
        Self {
            job_id: job_id.into(),
            location: location.into(),
            last_modified: modified_at.timestamp(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.last_modified == 0
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        if self.is_empty() {
            return None;
        }
        DateTime::from_timestamp(self.last_modified, 0)
    }

    /// 非空且作业标识完全一致
    pub fn matches(&self, key: &str) -> bool {
        !self.is_empty() && self.job_id == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_slot_sentinel() {
        let slot = TrackingRecord::empty();
        assert!(slot.is_empty());
        assert!(slot.modified_at().is_none());
        assert!(!slot.matches(""));
    }

    #[test]
    fn test_record_matches_only_when_occupied() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let record = TrackingRecord::new("42.clusterA", "clusterB", at);
        assert!(record.matches("42.clusterA"));
        assert!(!record.matches("42.clustera"));
        assert_eq!(record.modified_at(), Some(at));

        let stale = TrackingRecord {
            last_modified: 0,
            ..record
        };
        assert!(!stale.matches("42.clusterA"));
    }
}
