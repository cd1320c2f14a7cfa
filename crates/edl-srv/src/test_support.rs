//! Store doubles and fixtures shared by the unit tests.

use async_trait::async_trait;
use edl_core::{EdlError, IndicatorRecord, IndicatorStore, MemoryStore, PageResult, Result};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};

/// `n` IP indicators `10.0.0.0`, `10.0.0.1`, ... with heterogeneous fields.
///
/// From 21 records on, the field union is 29 columns: `value`,
/// `indicator_type`, five common fields, `tags` (even records only) and
/// one of 21 `custom_*` fields per record.
pub fn records(n: usize) -> Vec<IndicatorRecord> {
    (0..n)
        .map(|i| {
            let record = IndicatorRecord::new(format!("10.0.0.{i}"), "IP")
                .with_field("score", i % 4)
                .with_field("firstSeen", "2026-01-01T00:00:00Z")
                .with_field("lastSeen", "2026-10-01T00:00:00Z")
                .with_field("expiration", "0001-01-01T00:00:00Z")
                .with_field("sourceBrands", json!(["Feed Integration"]))
                .with_field(format!("custom_{}", i % 21), i);
            if i % 2 == 0 {
                record.with_field("tags", json!(["c2", "botnet"]))
            } else {
                record
            }
        })
        .collect()
}

/// A store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl IndicatorStore for FailingStore {
    async fn find_page(&self, _query: &str, _page: usize, _size: usize) -> Result<PageResult> {
        Err(EdlError::Http(String::from("store unavailable")))
    }
}

/// A memory store that can be switched into failing mode.
pub struct FlakyStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

impl FlakyStore {
    pub const fn new(records: Vec<IndicatorRecord>) -> Self {
        Self {
            inner: MemoryStore::new(records),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.inner.calls()
    }
}

#[async_trait]
impl IndicatorStore for FlakyStore {
    async fn find_page(&self, query: &str, page: usize, size: usize) -> Result<PageResult> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EdlError::Timeout(30));
        }
        self.inner.find_page(query, page, size).await
    }
}
