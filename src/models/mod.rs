// src/models/mod.rs

//! Domain models for the sync application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod assignment;
mod config;
mod summary;

// Re-export all public types
pub use assignment::{AssignmentRecord, PlannedTask};
pub use config::{Config, FeedConfig, NotionConfig, PropertyNames, SyncConfig};
pub use summary::{
    HandoffDocument, SkipReason, SkippedAssignment, SyncMode, SyncSummary,
};
