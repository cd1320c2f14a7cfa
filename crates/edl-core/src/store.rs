//! The indicator store seam.

use crate::{IndicatorRecord, PageResult, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A paged source of indicators.
///
/// Implementations return at most `size` records for page `page` (0-based)
/// of the indicators matching `query`, in a stable store order.
#[async_trait]
pub trait IndicatorStore: Send + Sync {
    /// Fetch one page of indicators matching `query`
    async fn find_page(&self, query: &str, page: usize, size: usize) -> Result<PageResult>;
}

#[async_trait]
impl<T: IndicatorStore + ?Sized> IndicatorStore for Arc<T> {
    async fn find_page(&self, query: &str, page: usize, size: usize) -> Result<PageResult> {
        (**self).find_page(query, page, size).await
    }
}

/// An in-process store over a fixed list of indicators.
///
/// An empty query matches everything; otherwise a record matches when its
/// value contains the query or its type equals it (case-insensitive).
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<IndicatorRecord>,
    calls: AtomicUsize,
}

impl MemoryStore {
    /// Create a store holding `records`
    #[must_use]
    pub const fn new(records: Vec<IndicatorRecord>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `find_page` calls served so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn matches(record: &IndicatorRecord, query: &str) -> bool {
        query.is_empty()
            || record.value.contains(query)
            || record
                .indicator_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(query))
    }
}

#[async_trait]
impl IndicatorStore for MemoryStore {
    async fn find_page(&self, query: &str, page: usize, size: usize) -> Result<PageResult> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let matching: Vec<&IndicatorRecord> = self
            .records
            .iter()
            .filter(|r| Self::matches(r, query))
            .collect();
        let total = matching.len() as u64;

        let iocs = matching
            .into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .cloned()
            .collect();

        Ok(PageResult {
            iocs,
            total: Some(total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            IndicatorRecord::new("1.1.1.1", "IP"),
            IndicatorRecord::new("2.2.2.2", "IP"),
            IndicatorRecord::new("evil.example", "Domain"),
        ])
    }

    #[tokio::test]
    async fn test_pages() {
        let store = store();
        let first = store.find_page("", 0, 2).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first.total, Some(3));
        let second = store.find_page("", 1, 2).await.unwrap();
        assert_eq!(second.iocs[0].value, "evil.example");
        let past_end = store.find_page("", 5, 2).await.unwrap();
        assert!(past_end.is_empty());
        assert_eq!(store.calls(), 3);
    }

    #[tokio::test]
    async fn test_query_filter() {
        let store = store();
        let domains = store.find_page("domain", 0, 10).await.unwrap();
        assert_eq!(domains.len(), 1);
        let ones = store.find_page("1.1", 0, 10).await.unwrap();
        assert_eq!(ones.iocs[0].value, "1.1.1.1");
    }

    #[tokio::test]
    async fn test_arc_store() {
        let store: Arc<dyn IndicatorStore> = Arc::new(store());
        let page = store.find_page("", 0, 10).await.unwrap();
        assert_eq!(page.len(), 3);
    }
}
