//! Service layer for the notice bot.
//!
//! This module contains the business logic for:
//! - Board fetching (`BoardFetcher`)
//! - Notice extraction (`NoticeExtractor`)
//! - Webhook delivery (`DiscordNotifier`)

mod board;
mod notices;
mod webhook;

pub use board::{BoardFetcher, BoardSource};
pub use notices::NoticeExtractor;
pub use webhook::{DiscordNotifier, Embed, EmbedField, EmbedFooter, NoticeNotifier, WebhookPayload};
