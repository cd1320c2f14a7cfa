//! Core types and traits for the EDL indicator feed.
//!
//! This crate provides the foundational types shared by the store client and
//! the feed server:
//!
//! - **Types**: [`IndicatorRecord`], [`PageResult`], [`IndicatorQuery`], [`OutputFormat`]
//! - **Store**: the [`IndicatorStore`] trait and an in-process [`MemoryStore`]
//! - **Errors**: [`EdlError`] and the [`Result`] alias
//!
//! # Example
//!
//! ```rust,ignore
//! use edl_core::{IndicatorStore, MemoryStore, IndicatorRecord};
//!
//! let store = MemoryStore::new(vec![IndicatorRecord::new("1.2.3.4", "IP")]);
//! let page = store.find_page("", 0, 200).await?;
//! println!("{} indicators", page.len());
//! ```

mod error;
mod store;
pub mod types;

pub use error::{EdlError, Result};
pub use store::{IndicatorStore, MemoryStore};
pub use types::*;
