//! Display projection of application state.
//!
//! # Responsibility
//! - Turn `AppState` into an ordered display model (chips + rows).
//! - Provide a plain-text projection for terminal front-ends.
//!
//! # Invariants
//! - Rendering is a pure function of state and recomputed in full each time.

pub mod render;
