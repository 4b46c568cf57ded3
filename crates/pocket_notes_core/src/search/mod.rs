//! Note search and filtering.
//!
//! # Responsibility
//! - Compute the visible subset of notes for the current UI state.
//! - Keep result shaping inside core.

pub mod query;
