//! edl-srv: External Dynamic List feed core.
//!
//! Serves a continuously refreshed list of threat indicators in a format
//! firewalls and proxies can consume for blocking.
//!
//! # Pipeline
//!
//! - [`fetcher`]: pages through the indicator store up to a size limit
//! - [`encoding`]: formats indicators as text, CSV, JSON or JSON-Seq
//! - [`cache`]: publishes formatted snapshots, refreshed by a timer or on demand
//! - [`serve`]: renders a snapshot as an HTTP body with its media type
//!
//! # Example
//!
//! ```rust,ignore
//! use edl_srv::config::CacheMode;
//! use edl_srv::{EdlCache, EdlConfig};
//! use std::sync::Arc;
//!
//! let config = EdlConfig::load_default()?;
//! config.validate()?;
//! let store = Arc::new(config.store_client()?);
//! let cache = Arc::new(EdlCache::from_config(&config, store)?);
//! let task = if cache.settings().mode == CacheMode::Scheduled {
//!     Some(edl_srv::cache::spawn_refresh_loop(cache.clone(), config.refresh_interval()?))
//! } else {
//!     None
//! };
//!
//! let snapshot = cache.get_edl_ioc_list().await?;
//! let response = edl_srv::serve::render(&snapshot);
//! ```

pub mod cache;
pub mod config;
pub mod encoding;
pub mod fetcher;
pub mod serve;

#[cfg(test)]
mod test_support;

// Re-exports for convenience.
pub use cache::{CacheSnapshot, EdlCache};
pub use config::EdlConfig;
pub use edl_core::{EdlError, Result};
pub use fetcher::{PagedFetcher, PAGE_SIZE};
