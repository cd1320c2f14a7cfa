//! The EDL value cache: builds formatted snapshots and serves them.
//!
//! The current snapshot sits behind an [`ArcSwapOption`], so readers load
//! it without locking and a refresh publishes with a single pointer swap.
//! Concurrent refreshes never move the published generation backwards: a
//! refresh that finishes behind a newer one is dropped.

mod refresh;
mod snapshot;

pub use refresh::{spawn_refresh_loop, RefreshTask};
pub use snapshot::CacheSnapshot;

use arc_swap::ArcSwapOption;
use edl_core::{IndicatorStore, OutputFormat, Result};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{CacheMode, CacheSettings, EdlConfig};
use crate::encoding::create_values_out_dict;
use crate::fetcher::PagedFetcher;

/// Process-wide cache of the formatted indicator list.
pub struct EdlCache {
    fetcher: PagedFetcher,
    settings: CacheSettings,
    current: ArcSwapOption<CacheSnapshot>,
    generation: AtomicU64,
    force_refresh: AtomicBool,
}

impl EdlCache {
    /// Create an empty cache.
    pub fn new(fetcher: PagedFetcher, settings: CacheSettings) -> Self {
        Self {
            fetcher,
            settings,
            current: ArcSwapOption::empty(),
            generation: AtomicU64::new(0),
            force_refresh: AtomicBool::new(false),
        }
    }

    /// Create an empty cache from validated config over `store`.
    pub fn from_config(config: &EdlConfig, store: Arc<dyn IndicatorStore>) -> Result<Self> {
        let fetcher = PagedFetcher::with_page_size(store, config.page_size)?;
        Ok(Self::new(fetcher, config.cache_settings()?))
    }

    /// Settings the cache was built with.
    pub const fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Fetch up to `limit` indicators and format them as serving lines.
    ///
    /// Lines follow insertion order of the formatted output. JSON yields a
    /// single line holding the whole document.
    pub async fn refresh_value_cache(
        &self,
        indicator_query: &str,
        out_format: OutputFormat,
        limit: usize,
    ) -> Result<Vec<String>> {
        let iocs = self.fetcher.fetch_to_limit(indicator_query, limit).await?;
        let out = create_values_out_dict(&iocs, out_format)?;
        Ok(out.into_values())
    }

    /// Rebuild the list from the store and publish it.
    ///
    /// On error nothing is published and the previous snapshot stays.
    pub async fn refresh(&self) -> Result<Arc<CacheSnapshot>> {
        let settings = &self.settings;
        let lines = self
            .refresh_value_cache(&settings.query, settings.format, settings.limit)
            .await?;

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let snapshot = self.publish(Arc::new(CacheSnapshot::new(
            lines,
            settings.format,
            generation,
        )));

        info!(
            generation = snapshot.generation(),
            lines = snapshot.len(),
            format = %settings.format,
            "refreshed EDL cache"
        );
        Ok(snapshot)
    }

    /// Publish `snapshot` unless a newer generation is already published.
    ///
    /// Returns whichever snapshot is published afterwards.
    fn publish(&self, snapshot: Arc<CacheSnapshot>) -> Arc<CacheSnapshot> {
        let previous = self.current.rcu(|current| match current {
            Some(published) if published.generation() > snapshot.generation() => {
                Some(Arc::clone(published))
            }
            _ => Some(Arc::clone(&snapshot)),
        });

        match previous {
            Some(published) if published.generation() > snapshot.generation() => {
                debug!(
                    stale = snapshot.generation(),
                    published = published.generation(),
                    "refresh superseded by a newer snapshot"
                );
                published
            }
            _ => snapshot,
        }
    }

    /// The published snapshot, if any refresh has completed.
    pub fn current(&self) -> Option<Arc<CacheSnapshot>> {
        self.current.load_full()
    }

    /// Make the next on-demand read rebuild the list.
    pub fn request_refresh(&self) {
        self.force_refresh.store(true, Ordering::Release);
    }

    /// The list to serve right now.
    ///
    /// Scheduled mode returns the published snapshot (an empty placeholder
    /// before the first refresh) and never waits on the store. On-demand
    /// mode refreshes first when nothing is published or a refresh was
    /// requested, and returns that refresh's error if it fails.
    pub async fn get_edl_ioc_list(&self) -> Result<Arc<CacheSnapshot>> {
        match self.settings.mode {
            CacheMode::Scheduled => Ok(self
                .current()
                .unwrap_or_else(|| Arc::new(CacheSnapshot::empty(self.settings.format)))),
            CacheMode::OnDemand => {
                let forced = self.force_refresh.swap(false, Ordering::AcqRel);
                if !forced {
                    if let Some(snapshot) = self.current() {
                        return Ok(snapshot);
                    }
                }

                debug!(forced, "on-demand EDL refresh");
                self.refresh().await.map_err(|e| {
                    if forced {
                        self.request_refresh();
                    }
                    e
                })
            }
        }
    }
}
