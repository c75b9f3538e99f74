// src/models/mod.rs

//! Domain models for the notice bot.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod notice;
mod selectors;

// Re-export all public types
pub use config::{
    BOARD_URL_ENV, BoardConfig, Config, CrawlerConfig, PathsConfig, WEBHOOK_URL_ENV,
    WebhookConfig,
};
pub use notice::{Notice, NoticeInfo, parse_id};
pub use selectors::BoardSelectors;

/// The persisted watermark document.
///
/// Serialized as `{ "Notice": <notice or null> }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WatermarkRecord {
    #[serde(rename = "Notice", default)]
    pub notice: Option<Notice>,
}

impl WatermarkRecord {
    pub fn new(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
        }
    }
}
