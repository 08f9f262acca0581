// src/storage/mod.rs

//! Storage abstractions for the hand-off document.
//!
//! In hand-off mode the sync run writes its planned tasks to a JSON file
//! instead of creating them; `publish` and `preview` read it back.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml              # Sync configuration
//! └── canvas_sync_data.json    # Hand-off document
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::HandoffDocument;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for hand-off document backends.
#[async_trait]
pub trait HandoffStore: Send + Sync {
    /// Write the document under `name`, replacing any previous one.
    async fn save_handoff(&self, name: &str, document: &HandoffDocument) -> Result<()>;

    /// Read the document under `name`, or `None` if it does not exist.
    async fn load_handoff(&self, name: &str) -> Result<Option<HandoffDocument>>;
}
