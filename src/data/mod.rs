//! Data fetching and storage
//!
//! Handles:
//! - Yahoo Finance API for spot quotes and option chains
//! - Time-bounded local caching of fetched data
//! - Scenario history persistence

pub mod cache;
pub mod store;
pub mod yahoo;

pub use cache::*;
pub use store::*;
pub use yahoo::*;
