//! Browser DOM layer for excerpt selection tracking.
//!
//! This crate implements the core's `SelectionPlatform` on top of the DOM
//! Selection API and wires the tracker to browser events. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom`: `DomSelection`, reading `window.getSelection()` relative to a container
//! - `listeners`: `selectionchange` / `keydown` / `keyup` / `resize` wiring with teardown on drop
//! - `telemetry`: wasm console logging and panic hook
//!
//! # Re-exports
//!
//! This crate re-exports `excerpt-core` for convenience, so consumers
//! only need to depend on `excerpt-browser`.

// Re-export core crate
pub use excerpt_core;
pub use excerpt_core::*;

pub mod dom;
pub mod listeners;
pub mod telemetry;

pub use dom::DomSelection;
pub use listeners::{SelectionListeners, SharedTracker, update_and_notify};
