use super::IndicatorRecord;
use serde::{Deserialize, Serialize};

/// One page of indicators from the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// Indicators on this page, in store order
    #[serde(default)]
    pub iocs: Vec<IndicatorRecord>,

    /// Total number of matching indicators, if the store reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl PageResult {
    /// Create a page without a total count
    #[must_use]
    pub const fn new(iocs: Vec<IndicatorRecord>) -> Self {
        Self { iocs, total: None }
    }

    /// Returns true if the page holds no indicators
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iocs.is_empty()
    }

    /// Number of indicators on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.iocs.len()
    }
}

/// An indicator query with its result limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorQuery {
    /// Store filter expression; empty matches everything
    pub query: String,

    /// Maximum number of indicators to return
    pub limit: usize,

    /// Size of the previous page when continuing an earlier fetch
    pub last_found_len: Option<usize>,
}

impl IndicatorQuery {
    /// Create a query starting from the first page
    #[must_use]
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            limit,
            last_found_len: None,
        }
    }

    /// Seed the previous page size used for the exhaustion check
    #[must_use]
    pub const fn last_found_len(mut self, len: usize) -> Self {
        self.last_found_len = Some(len);
        self
    }
}
