//! Core use-case services.
//!
//! # Responsibility
//! - Model user interactions as explicit state transitions.
//! - Keep front-ends decoupled from storage and rendering details.

pub mod app_state;
pub mod notes_app;
