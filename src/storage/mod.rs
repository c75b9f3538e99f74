//! Storage abstractions for the notice watermark.
//!
//! The watermark is the single most recently notified notice. It is the
//! novelty threshold for the next run.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml           # Bot configuration
//! └── lastId.json           # Watermark: { "Notice": { ... } }
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Notice;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for watermark storage backends.
#[async_trait]
pub trait WatermarkStore: Send + Sync {
    /// Load the last notified notice.
    ///
    /// Read or parse failures are logged and reported as no history.
    async fn load_watermark(&self) -> Option<Notice>;

    /// Replace the stored watermark with `notice`.
    async fn save_watermark(&self, notice: &Notice) -> Result<()>;
}
