//! HTTP client for a remote indicator store.
//!
//! This crate provides [`StoreClient`], an [`IndicatorStore`] that pages
//! through indicators over HTTP, rate limited on the client side.

mod client;
mod config;

pub use client::{StoreClient, StoreClientBuilder};
pub use config::*;
pub use edl_core::{EdlError, IndicatorStore, Result};
