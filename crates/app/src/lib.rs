//! Application core for the bookshelf.
//!
//! This crate contains the orchestrator that refreshes the book list from
//! a catalog source and the lifecycle state it publishes.

pub mod orchestrator;
pub mod state;

pub use orchestrator::{RefreshOrchestrator, RefreshOutcome, fetch_catalog};
pub use state::{Phase, RefreshState};
