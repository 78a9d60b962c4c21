//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`exports`] — Export submission
//! - [`artifacts`] — Artifact download
//! - [`system`] — Health and OpenAPI

mod artifacts;
mod exports;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use artifacts::*;
pub use exports::*;
pub use system::*;
