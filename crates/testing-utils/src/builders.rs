//! Test data builders for creating test entities
//!
//! This module provides builder patterns for creating test data with
//! sensible defaults and easy customization.

use chrono::{DateTime, Duration, TimeZone, Utc};
use locator_core::{JobState, LiveJobRecord, TrackingRecord};

/// Builder for creating test LiveJobRecord entities
pub struct LiveJobBuilder {
    job: LiveJobRecord,
}

impl LiveJobBuilder {
    pub fn new(job_id: &str) -> Self {
        Self {
            job: LiveJobRecord::new(job_id, JobState::Queued),
        }
    }

    pub fn with_state(mut self, state: JobState) -> Self {
        self.job.state = state;
        self
    }

    pub fn running(self) -> Self {
        self.with_state(JobState::Running)
    }

    pub fn moved(self) -> Self {
        self.with_state(JobState::Moved)
    }

    pub fn archived(mut self) -> Self {
        self.job.archived = true;
        self
    }

    pub fn build(self) -> LiveJobRecord {
        self.job
    }
}

/// Builder for creating test TrackingRecord entities
pub struct TrackingRecordBuilder {
    record: TrackingRecord,
}

impl TrackingRecordBuilder {
    pub fn new(job_id: &str, location: &str) -> Self {
        Self {
            record: TrackingRecord::new(job_id, location, base_time()),
        }
    }

    pub fn modified_at(mut self, at: DateTime<Utc>) -> Self {
        self.record.last_modified = at.timestamp();
        self
    }

    /// Offset from a fixed base time, so ordering between records is explicit
    pub fn aged_minutes(self, minutes: i64) -> Self {
        self.modified_at(base_time() - Duration::minutes(minutes))
    }

    pub fn empty_slot(mut self) -> Self {
        self.record.last_modified = 0;
        self
    }

    pub fn build(self) -> TrackingRecord {
        self.record
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}
