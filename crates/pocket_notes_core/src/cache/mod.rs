//! Offline asset cache.
//!
//! # Responsibility
//! - Pre-populate a named cache with the static asset list on install.
//! - Drop stale caches on activate.
//! - Serve fetches cache-first, falling back to the network.
//!
//! # Invariants
//! - Install is all-or-nothing.
//! - Note storage never depends on cache state.

pub mod asset_cache;
