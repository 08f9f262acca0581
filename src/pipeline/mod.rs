// src/pipeline/mod.rs

//! Pipeline entry points for sync operations.
//!
//! - `run_sync`: Fetch the feed and publish (or hand off) assignments
//! - `run_publish` / `run_preview`: Consume a hand-off file
//! - `run_validate`: Check configuration

pub mod publish;
pub mod sync;
pub mod validate;

pub use publish::{preview_lines, run_preview, run_publish};
pub use sync::{report_summary, run_sync};
pub use validate::run_validate;
