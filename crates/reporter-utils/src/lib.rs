//! Shared utilities for reporter-rs
//!
//! Logging initialization and small text helpers used by the other crates.

pub mod logging;
pub mod text;

pub use logging::init_tracing;
pub use text::{decode_entities, truncate_chars};
