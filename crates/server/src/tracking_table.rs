use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use locator_core::{TrackingLookup, TrackingRecord};
use locator_errors::{LocatorError, LocatorResult};

/// 固定容量的作业位置跟踪表
///
/// 整张表由一把读写锁保护，记录总是整体替换，读者不会看到字段不一致的槽位。
/// 写入接口供作业迁移/归档子系统使用，定位服务只做查找。
///
/// 表本身不保证作业标识唯一；出现重复时查找返回槽位顺序上的第一条。
#[derive(Debug)]
pub struct TrackingTable {
    slots: RwLock<Vec<TrackingRecord>>,
}

impl TrackingTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: RwLock::new(vec![TrackingRecord::empty(); capacity]),
        }
    }

    /// 按给定槽位顺序装载，剩余槽位为空
    pub fn from_slots(capacity: usize, records: Vec<TrackingRecord>) -> LocatorResult<Self> {
        if records.len() > capacity {
            return Err(LocatorError::ResourceExhausted(format!(
                "跟踪记录数 {} 超过容量 {}",
                records.len(),
                capacity
            )));
        }
        let mut slots = records;
        slots.resize(capacity, TrackingRecord::empty());
        Ok(Self {
            slots: RwLock::new(slots),
        })
    }

    fn read(&self) -> LocatorResult<RwLockReadGuard<'_, Vec<TrackingRecord>>> {
        self.slots
            .read()
            .map_err(|_| LocatorError::internal("跟踪表读锁已损坏"))
    }

    fn write(&self) -> LocatorResult<RwLockWriteGuard<'_, Vec<TrackingRecord>>> {
        self.slots
            .write()
            .map_err(|_| LocatorError::internal("跟踪表写锁已损坏"))
    }

    /// 写入或更新一条记录
    ///
    /// 已存在同名记录时仅当新记录不旧于旧记录才覆盖；否则占用第一个空槽位；
    /// 表满时淘汰最旧的记录。
    pub fn track(&self, record: TrackingRecord) -> LocatorResult<()> {
        if record.is_empty() {
            return Err(LocatorError::invalid_argument("跟踪记录的修改时间"));
        }
        let mut slots = self.write()?;

        if let Some(slot) = slots.iter_mut().find(|s| s.matches(&record.job_id)) {
            if record.last_modified >= slot.last_modified {
                debug!("更新作业 {} 的跟踪位置: {}", record.job_id, record.location);
                *slot = record;
            }
            return Ok(());
        }

        if let Some(slot) = slots.iter_mut().find(|s| s.is_empty()) {
            debug!("记录作业 {} 的跟踪位置: {}", record.job_id, record.location);
            *slot = record;
            return Ok(());
        }

        let oldest = slots
            .iter_mut()
            .min_by_key(|s| s.last_modified)
            .ok_or_else(|| LocatorError::ResourceExhausted("跟踪表容量为0".to_string()))?;
        debug!(
            "跟踪表已满，淘汰作业 {} 的记录以记录作业 {}",
            oldest.job_id, record.job_id
        );
        *oldest = record;
        Ok(())
    }

    /// 清除该作业的所有记录，返回清除的槽位数
    pub fn untrack(&self, job_id: &str) -> LocatorResult<usize> {
        let mut slots = self.write()?;
        let mut cleared = 0;
        for slot in slots.iter_mut().filter(|s| s.matches(job_id)) {
            *slot = TrackingRecord::empty();
            cleared += 1;
        }
        Ok(cleared)
    }

    /// 非空记录，按槽位顺序
    pub fn records(&self) -> LocatorResult<Vec<TrackingRecord>> {
        Ok(self
            .read()?
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect())
    }

    pub fn len(&self) -> LocatorResult<usize> {
        Ok(self.read()?.iter().filter(|s| !s.is_empty()).count())
    }

    pub fn is_empty(&self) -> LocatorResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl TrackingLookup for TrackingTable {
    fn find_location(&self, key: &str) -> LocatorResult<Option<String>> {
        let slots = self.read()?;
        Ok(slots
            .iter()
            .find(|slot| slot.matches(key))
            .map(|slot| slot.location.clone()))
    }

    fn capacity(&self) -> usize {
        self.slots.read().map(|s| s.len()).unwrap_or(0)
    }
}
