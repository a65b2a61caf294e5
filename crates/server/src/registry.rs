use std::collections::HashMap;
use std::sync::RwLock;

use locator_core::{JobRegistry, LiveJobRecord};
use locator_errors::{LocatorError, LocatorResult};

/// 内存中的实时作业表
///
/// 按完整作业标识精确查找，短标识由定位服务补全后再查询。
#[derive(Debug, Default)]
pub struct InMemoryJobRegistry {
    jobs: RwLock<HashMap<String, LiveJobRecord>>,
}

impl InMemoryJobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<LiveJobRecord>) -> Self {
        let registry = Self::new();
        if let Ok(mut map) = registry.jobs.write() {
            map.extend(jobs.into_iter().map(|job| (job.job_id.clone(), job)));
        }
        registry
    }

    pub fn insert(&self, job: LiveJobRecord) -> LocatorResult<()> {
        self.jobs
            .write()
            .map_err(|_| LocatorError::internal("作业表写锁已损坏"))?
            .insert(job.job_id.clone(), job);
        Ok(())
    }

    pub fn remove(&self, job_id: &str) -> LocatorResult<Option<LiveJobRecord>> {
        Ok(self
            .jobs
            .write()
            .map_err(|_| LocatorError::internal("作业表写锁已损坏"))?
            .remove(job_id))
    }

    pub fn len(&self) -> usize {
        self.jobs.read().map(|jobs| jobs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl JobRegistry for InMemoryJobRegistry {
    fn find_job(&self, job_id: &str) -> LocatorResult<Option<LiveJobRecord>> {
        Ok(self
            .jobs
            .read()
            .map_err(|_| LocatorError::internal("作业表读锁已损坏"))?
            .get(job_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locator_core::JobState;

    #[test]
    fn test_lookup_is_exact() {
        let registry = InMemoryJobRegistry::with_jobs(
            vec![LiveJobRecord::new("42.clusterA", JobState::Running)],
        );
        assert!(registry.find_job("42.clusterA").unwrap().is_some());
        assert!(registry.find_job("42").unwrap().is_none());
        assert!(registry.find_job("42.clusterB").unwrap().is_none());
        assert!(registry.find_job("43").unwrap().is_none());
    }

    #[test]
    fn test_insert_and_remove() {
        let registry = InMemoryJobRegistry::new();
        assert!(registry.is_empty());
        registry
            .insert(LiveJobRecord::new("1.clusterA", JobState::Queued))
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.remove("1.clusterA").unwrap().is_some());
        assert!(registry.find_job("1.clusterA").unwrap().is_none());
    }
}
