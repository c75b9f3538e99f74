// src/services/webhook.rs

//! Discord webhook notifier.
//!
//! Formats a notice as a single embed and posts it to the configured webhook.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{Notice, WebhookConfig};
use crate::utils::text::truncate;

// Discord embed limits, in characters
const TITLE_LIMIT: usize = 256;
const DESCRIPTION_LIMIT: usize = 4096;
const FIELD_VALUE_LIMIT: usize = 1024;
const FOOTER_LIMIT: usize = 2048;

/// Delivers one notice to a chat channel.
#[async_trait]
pub trait NoticeNotifier: Send + Sync {
    async fn notify(&self, notice: &Notice) -> Result<()>;
}

/// Webhook request body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

/// A Discord rich embed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
}

/// Posts notices to a Discord webhook.
pub struct DiscordNotifier {
    client: Client,
    webhook_url: String,
    embed: WebhookConfig,
    list_url: String,
}

impl DiscordNotifier {
    /// Create a notifier; fails if no webhook URL is configured.
    pub fn new(client: Client, embed: &WebhookConfig, list_url: impl Into<String>) -> Result<Self> {
        let webhook_url = embed
            .url
            .clone()
            .ok_or_else(|| AppError::config("webhook URL is not configured"))?;

        Ok(Self {
            client,
            webhook_url,
            embed: embed.clone(),
            list_url: list_url.into(),
        })
    }

    /// Build the embed payload for a notice.
    pub fn build_payload(&self, notice: &Notice, timestamp: DateTime<Utc>) -> WebhookPayload {
        let cfg = &self.embed;

        let description = format!(
            "### [{}]({})\n\n{}",
            escape_link_text(&notice.title),
            notice.link,
            cfg.description
        );
        let links = format!(
            "[{}]({})  |  [{}]({})",
            cfg.detail_link_text, notice.link, cfg.list_link_text, self.list_url
        );

        WebhookPayload {
            embeds: vec![Embed {
                title: truncate(&cfg.title, TITLE_LIMIT),
                description: truncate(&description, DESCRIPTION_LIMIT),
                color: cfg.color,
                fields: vec![
                    field(&cfg.date_field, &code(&notice.info.date), true),
                    field(&cfg.id_field, &code(&notice.id), true),
                    field(&cfg.links_field, &links, false),
                ],
                footer: EmbedFooter {
                    text: truncate(&cfg.footer, FOOTER_LIMIT),
                },
                timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            }],
        }
    }
}

#[async_trait]
impl NoticeNotifier for DiscordNotifier {
    async fn notify(&self, notice: &Notice) -> Result<()> {
        let payload = self.build_payload(notice, Utc::now());

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::notify(&notice.id, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::notify(
                &notice.id,
                format!("HTTP {status}: {}", body.trim()),
            ));
        }

        log::info!("Discord notification sent: {}", notice.id);
        Ok(())
    }
}

fn field(name: &str, value: &str, inline: bool) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value: truncate(value, FIELD_VALUE_LIMIT),
        inline,
    }
}

/// Inline code span; Discord rejects empty field values.
fn code(text: &str) -> String {
    if text.is_empty() {
        "`-`".to_string()
    } else {
        format!("`{}`", text.replace('`', "'"))
    }
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
