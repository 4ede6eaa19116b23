//! Core abstractions for the invest reporter
//!
//! This crate defines the fundamental traits and types shared by the report
//! pipeline: the `Agent` trait, the per-run `Context`, and the error type.

pub mod agent;
pub mod context;
pub mod error;

pub use agent::Agent;
pub use context::Context;
pub use error::{Error, Result};
