//! Paged fetcher: pulls indicators from the store up to a limit.
//!
//! The store is walked page by page from page 0. Fetching stops as soon as
//! the limit is reached, a short page comes back, or the store's reported
//! total has been covered.

use edl_core::{EdlError, IndicatorQuery, IndicatorRecord, IndicatorStore, Result};
use std::sync::Arc;
use tracing::debug;

/// Default number of indicators requested per store call.
pub const PAGE_SIZE: usize = 200;

/// Position of a fetch that may be continued by a later call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    /// Records accumulated so far, across earlier calls.
    pub total_fetched: usize,
    /// Next page index to request.
    pub next_page: usize,
    /// Size of the last page seen; `None` on a fresh fetch.
    pub last_found_len: Option<usize>,
}

/// Fetches indicators from a store in bounded pages.
#[derive(Clone)]
pub struct PagedFetcher {
    store: Arc<dyn IndicatorStore>,
    page_size: usize,
}

impl PagedFetcher {
    /// Create a fetcher using the default page size.
    pub fn new(store: Arc<dyn IndicatorStore>) -> Self {
        Self {
            store,
            page_size: PAGE_SIZE,
        }
    }

    /// Create a fetcher with a custom page size.
    pub fn with_page_size(store: Arc<dyn IndicatorStore>, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(EdlError::Config(String::from("page_size must be positive")));
        }
        Ok(Self { store, page_size })
    }

    /// Page size used for every store call.
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch at most `limit` indicators matching `query`, in store order.
    pub async fn fetch_to_limit(&self, query: &str, limit: usize) -> Result<Vec<IndicatorRecord>> {
        self.fetch(&IndicatorQuery::new(query, limit)).await
    }

    /// Fetch at most `query.limit` indicators, honouring `last_found_len`.
    pub async fn fetch(&self, query: &IndicatorQuery) -> Result<Vec<IndicatorRecord>> {
        let cursor = PageCursor {
            last_found_len: query.last_found_len,
            ..PageCursor::default()
        };
        let (mut iocs, cursor) = self.fetch_loop(&query.query, query.limit, cursor).await?;
        iocs.truncate(query.limit);

        debug!(
            query = %query.query,
            limit = query.limit,
            fetched = iocs.len(),
            pages = cursor.next_page,
            "fetched indicators"
        );
        Ok(iocs)
    }

    /// Walk pages from `cursor` until the limit or the end of the store.
    ///
    /// Returns every record fetched by this call (possibly more than
    /// `limit`, since whole pages are kept) and the cursor to continue from.
    /// A `last_found_len` shorter than the page size means the store was
    /// already exhausted, so nothing is requested.
    pub async fn fetch_loop(
        &self,
        query: &str,
        limit: usize,
        cursor: PageCursor,
    ) -> Result<(Vec<IndicatorRecord>, PageCursor)> {
        let mut iocs = Vec::new();
        let mut total_fetched = cursor.total_fetched;
        let mut next_page = cursor.next_page;
        let mut last_found_len = cursor.last_found_len.unwrap_or(self.page_size);
        let mut store_total = None;

        while last_found_len >= self.page_size
            && total_fetched < limit
            && !store_total.is_some_and(|total| (next_page * self.page_size) as u64 >= total)
        {
            debug!(query, page = next_page, size = self.page_size, "requesting indicator page");
            let page = self.store.find_page(query, next_page, self.page_size).await?;

            last_found_len = page.len();
            total_fetched += last_found_len;
            store_total = page.total;
            next_page += 1;
            iocs.extend(page.iocs);
        }

        Ok((
            iocs,
            PageCursor {
                total_fetched,
                next_page,
                last_found_len: Some(last_found_len),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{records, FailingStore};
    use edl_core::MemoryStore;

    fn fetcher(store: &Arc<MemoryStore>, page_size: usize) -> PagedFetcher {
        PagedFetcher::with_page_size(store.clone(), page_size).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_truncates_to_limit() {
        let store = Arc::new(MemoryStore::new(records(38)));
        let iocs = fetcher(&store, PAGE_SIZE).fetch_to_limit("", 30).await.unwrap();
        assert_eq!(iocs.len(), 30);
        assert_eq!(iocs[0].value, "10.0.0.0");
        assert_eq!(iocs[29].value, "10.0.0.29");
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_stops_at_exhaustion() {
        let store = Arc::new(MemoryStore::new(records(38)));
        let iocs = fetcher(&store, 10).fetch_to_limit("", 100).await.unwrap();
        assert_eq!(iocs.len(), 38);
        // Pages of 10, 10, 10, 8; the short page ends the walk.
        assert_eq!(store.calls(), 4);
    }

    #[tokio::test]
    async fn test_fetch_exact_multiple_uses_store_total() {
        let store = Arc::new(MemoryStore::new(records(40)));
        let iocs = fetcher(&store, 10).fetch_to_limit("", 100).await.unwrap();
        assert_eq!(iocs.len(), 40);
        // The reported total stops the walk without an empty fifth page.
        assert_eq!(store.calls(), 4);
    }

    #[tokio::test]
    async fn test_fetch_spans_pages_in_order() {
        let store = Arc::new(MemoryStore::new(records(38)));
        let iocs = fetcher(&store, 7).fetch_to_limit("", 20).await.unwrap();
        let values: Vec<String> = iocs.iter().map(|r| r.value.clone()).collect();
        let expected: Vec<String> = (0..20).map(|i| format!("10.0.0.{i}")).collect();
        assert_eq!(values, expected);
        assert_eq!(store.calls(), 3);
    }

    #[tokio::test]
    async fn test_zero_limit_fetches_nothing() {
        let store = Arc::new(MemoryStore::new(records(5)));
        let iocs = fetcher(&store, PAGE_SIZE).fetch_to_limit("", 0).await.unwrap();
        assert!(iocs.is_empty());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_loop_stops_on_last_page() {
        let store = Arc::new(MemoryStore::new(records(38)));
        let (iocs, cursor) = fetcher(&store, PAGE_SIZE)
            .fetch_loop("", 50, PageCursor::default())
            .await
            .unwrap();
        assert_eq!(iocs.len(), 38);
        assert_eq!(cursor.next_page, 1);
        assert_eq!(cursor.last_found_len, Some(38));
    }

    #[tokio::test]
    async fn test_loop_stops_on_limit() {
        let store = Arc::new(MemoryStore::new(records(100)));
        let cursor = PageCursor {
            last_found_len: Some(38),
            ..PageCursor::default()
        };
        let (iocs, cursor) = fetcher(&store, 38).fetch_loop("", 30, cursor).await.unwrap();
        assert_eq!(iocs.len(), 38);
        assert_eq!(cursor.next_page, 1);
        assert_eq!(cursor.total_fetched, 38);
    }

    #[tokio::test]
    async fn test_loop_resumes_from_cursor() {
        let store = Arc::new(MemoryStore::new(records(25)));
        let fetcher = fetcher(&store, 10);

        let (first, cursor) = fetcher.fetch_loop("", 10, PageCursor::default()).await.unwrap();
        assert_eq!(first.len(), 10);

        let (rest, cursor) = fetcher.fetch_loop("", 100, cursor).await.unwrap();
        assert_eq!(rest.len(), 15);
        assert_eq!(rest[0].value, "10.0.0.10");
        assert_eq!(cursor.total_fetched, 25);
        assert_eq!(cursor.next_page, 3);
    }

    #[tokio::test]
    async fn test_short_last_found_len_skips_fetch() {
        let store = Arc::new(MemoryStore::new(records(25)));
        let query = IndicatorQuery::new("", 10).last_found_len(3);
        let iocs = fetcher(&store, 10).fetch(&query).await.unwrap();
        assert!(iocs.is_empty());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let fetcher = PagedFetcher::new(Arc::new(FailingStore));
        let err = fetcher.fetch_to_limit("", 10).await.unwrap_err();
        assert!(matches!(err, EdlError::Http(_)));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let store: Arc<dyn IndicatorStore> = Arc::new(MemoryStore::new(Vec::new()));
        assert!(PagedFetcher::with_page_size(store, 0).is_err());
    }
}
