//! Core library for reposcout.
//!
//! Everything here is rendering-free: the wire data model (`types`), the HTTP
//! API client (`api`), and the token-based selection state machine
//! (`selection`). The TUI binary consumes these; the race-safety contract
//! lives entirely in [`selection`] so it can be exercised headless.

pub mod api;
pub mod selection;
pub mod types;

pub use api::{ApiClient, ApiError};
pub use selection::{Arrival, DetailPane, DetailRequest, DetailState};
