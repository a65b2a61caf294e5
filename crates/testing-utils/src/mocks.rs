//! Mock implementations of the collaborator traits
//!
//! Every mock counts how often it was consulted so tests can assert which
//! data sources a lookup touched.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use locator_core::{HostnameCanonicalizer, JobRegistry, LiveJobRecord, TrackingLookup, TrackingRecord};
use locator_errors::{LocatorError, LocatorResult};

/// Mock implementation of JobRegistry for testing
#[derive(Debug, Clone, Default)]
pub struct MockJobRegistry {
    jobs: Arc<Mutex<HashMap<String, LiveJobRecord>>>,
    lookups: Arc<AtomicUsize>,
}

impl MockJobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<LiveJobRecord>) -> Self {
        let registry = Self::new();
        for job in jobs {
            registry.insert(job);
        }
        registry
    }

    pub fn insert(&self, job: LiveJobRecord) {
        self.jobs.lock().unwrap().insert(job.job_id.clone(), job);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl JobRegistry for MockJobRegistry {
    fn find_job(&self, job_id: &str) -> LocatorResult<Option<LiveJobRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.jobs.lock().unwrap().get(job_id).cloned())
    }
}

/// Slot-ordered tracking lookup over a plain vector
#[derive(Debug, Clone, Default)]
pub struct MockTrackingLookup {
    slots: Vec<TrackingRecord>,
    lookups: Arc<AtomicUsize>,
}

impl MockTrackingLookup {
    pub fn new(slots: Vec<TrackingRecord>) -> Self {
        Self {
            slots,
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl TrackingLookup for MockTrackingLookup {
    fn find_location(&self, key: &str) -> LocatorResult<Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .slots
            .iter()
            .find(|slot| slot.matches(key))
            .map(|slot| slot.location.clone()))
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }
}

/// Canonicalizer answering from a fixed table
#[derive(Debug, Clone, Default)]
pub struct StaticCanonicalizer {
    names: HashMap<String, String>,
    identity: bool,
    calls: Arc<AtomicUsize>,
}

impl StaticCanonicalizer {
    /// Every host resolves to itself
    pub fn identity() -> Self {
        Self {
            identity: true,
            ..Self::default()
        }
    }

    /// Only the listed hosts resolve
    pub fn with_names(names: &[(&str, &str)]) -> Self {
        Self {
            names: names
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HostnameCanonicalizer for StaticCanonicalizer {
    fn canonicalize(&self, host: &str) -> LocatorResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(name) = self.names.get(host) {
            return Ok(name.clone());
        }
        if self.identity {
            return Ok(host.to_string());
        }
        Err(LocatorError::host_resolution(host, "unknown host"))
    }
}

/// Canonicalizer for which every lookup fails
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingCanonicalizer;

impl HostnameCanonicalizer for FailingCanonicalizer {
    fn canonicalize(&self, host: &str) -> LocatorResult<String> {
        Err(LocatorError::host_resolution(host, "name resolution unavailable"))
    }
}
