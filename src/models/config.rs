//! Application configuration structures.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::BoardSelectors;

/// Environment variable holding the Discord webhook URL.
pub const WEBHOOK_URL_ENV: &str = "DISCORD_WEBHOOK_URL";

/// Environment variable that overrides the board list URL.
pub const BOARD_URL_ENV: &str = "NOTICE_BOARD_URL";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and pacing settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Notice board location and markup
    #[serde(default)]
    pub board: BoardConfig,

    /// Discord webhook delivery settings
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// File locations under the storage directory
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using the given variable lookup.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(WEBHOOK_URL_ENV) {
            self.webhook.url = Some(url.trim().to_string());
        }
        if let Some(url) = non_empty(BOARD_URL_ENV) {
            self.board.url = url.trim().to_string();
        }
        self
    }

    /// Validate configuration values for basic sanity.
    ///
    /// The webhook URL is only checked when `require_webhook` is set, so a
    /// dry run can go ahead without one.
    pub fn validate(&self, require_webhook: bool) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == Some(0) {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }

        Url::parse(&self.board.url)
            .map_err(|e| AppError::validation(format!("board.url is invalid: {e}")))?;
        self.board.origin()?;

        for (key, selector) in self.board.selectors.selector_entries() {
            Selector::parse(selector).map_err(|e| {
                AppError::validation(format!("board.selectors.{key} '{selector}': {e:?}"))
            })?;
        }
        if self.board.selectors.pinned_class.trim().is_empty() {
            return Err(AppError::validation("board.selectors.pinned_class is empty"));
        }

        if require_webhook {
            let url = self.webhook.url.as_deref().ok_or_else(|| {
                AppError::validation(format!("webhook URL missing; set {WEBHOOK_URL_ENV}"))
            })?;
            Url::parse(url)
                .map_err(|e| AppError::validation(format!("webhook URL is invalid: {e}")))?;
        }

        if self.paths.watermark_file.trim().is_empty() {
            return Err(AppError::validation("paths.watermark_file is empty"));
        }
        Ok(())
    }
}

/// HTTP client and pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds (transport default when unset)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Pause between webhook deliveries in milliseconds
    #[serde(default = "defaults::notify_delay")]
    pub notify_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
            notify_delay_ms: defaults::notify_delay(),
        }
    }
}

/// Notice board location and markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// URL of the board list page
    #[serde(default = "defaults::board_url")]
    pub url: String,

    /// Site origin prefixed to relative links (derived from `url` when unset)
    #[serde(default)]
    pub origin: Option<String>,

    /// Suffix appended to every detail link
    #[serde(default = "defaults::link_suffix")]
    pub link_suffix: String,

    /// Markup selectors
    #[serde(default)]
    pub selectors: BoardSelectors,
}

impl BoardConfig {
    /// Site origin used to absolutize relative links, without trailing slash.
    pub fn origin(&self) -> Result<String> {
        if let Some(origin) = &self.origin {
            return Ok(origin.trim_end_matches('/').to_string());
        }
        let url = Url::parse(&self.url)?;
        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(AppError::config(format!(
                "board.url has no usable origin: {}",
                self.url
            )));
        }
        Ok(origin.ascii_serialization())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            url: defaults::board_url(),
            origin: None,
            link_suffix: defaults::link_suffix(),
            selectors: BoardSelectors::default(),
        }
    }
}

/// Discord webhook delivery and embed text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Webhook endpoint; usually supplied through the environment
    #[serde(default, skip_serializing)]
    pub url: Option<String>,

    /// Embed title banner
    #[serde(default = "defaults::embed_title")]
    pub title: String,

    /// Line shown under the linked notice title
    #[serde(default = "defaults::embed_description")]
    pub description: String,

    /// Embed accent color
    #[serde(default = "defaults::embed_color")]
    pub color: u32,

    /// Embed footer text
    #[serde(default = "defaults::embed_footer")]
    pub footer: String,

    #[serde(default = "defaults::date_field")]
    pub date_field: String,

    #[serde(default = "defaults::id_field")]
    pub id_field: String,

    #[serde(default = "defaults::links_field")]
    pub links_field: String,

    #[serde(default = "defaults::detail_link_text")]
    pub detail_link_text: String,

    #[serde(default = "defaults::list_link_text")]
    pub list_link_text: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            title: defaults::embed_title(),
            description: defaults::embed_description(),
            color: defaults::embed_color(),
            footer: defaults::embed_footer(),
            date_field: defaults::date_field(),
            id_field: defaults::id_field(),
            links_field: defaults::links_field(),
            detail_link_text: defaults::detail_link_text(),
            list_link_text: defaults::list_link_text(),
        }
    }
}

/// File locations, relative to the storage directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Watermark file holding the last notified notice
    #[serde(default = "defaults::watermark_file")]
    pub watermark_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            watermark_file: defaults::watermark_file(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; notice-bot/0.1)".into()
    }
    pub fn notify_delay() -> u64 {
        1500
    }

    // Board defaults
    pub fn board_url() -> String {
        "https://mirae.yonsei.ac.kr/wj/1415/subview.do".into()
    }
    pub fn link_suffix() -> String {
        "?layout=unknown".into()
    }

    // Embed defaults
    pub fn embed_title() -> String {
        "📢 연세대학교 미래캠퍼스 새 공지사항".into()
    }
    pub fn embed_description() -> String {
        "새로운 학사 공지가 등록되었습니다. 아래 정보를 확인하세요.".into()
    }
    pub fn embed_color() -> u32 {
        0x003399
    }
    pub fn embed_footer() -> String {
        "Yonsei Mirae Notice Bot".into()
    }
    pub fn date_field() -> String {
        "📅 작성일".into()
    }
    pub fn id_field() -> String {
        "🆔 글 번호".into()
    }
    pub fn links_field() -> String {
        "🔗 바로가기".into()
    }
    pub fn detail_link_text() -> String {
        "📄 상세 보기".into()
    }
    pub fn list_link_text() -> String {
        "📋 전체 목록".into()
    }

    // Path defaults
    pub fn watermark_file() -> String {
        "lastId.json".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_webhook() -> Config {
        Config::default().with_env_from(|key| match key {
            WEBHOOK_URL_ENV => Some("https://discord.com/api/webhooks/1/abc".to_string()),
            _ => None,
        })
    }

    #[test]
    fn validate_default_config_without_webhook() {
        assert!(Config::default().validate(false).is_ok());
        assert!(Config::default().validate(true).is_err());
    }

    #[test]
    fn validate_with_webhook_from_env() {
        let config = with_webhook();
        assert_eq!(
            config.webhook.url.as_deref(),
            Some("https://discord.com/api/webhooks/1/abc")
        );
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = with_webhook();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate(true).is_err());
    }

    #[test]
    fn validate_rejects_bad_selector() {
        let mut config = with_webhook();
        config.board.selectors.title_selector = "[[invalid".to_string();
        assert!(config.validate(true).is_err());
    }

    #[test]
    fn env_ignores_blank_values() {
        let config = Config::default().with_env_from(|_| Some("   ".to_string()));
        assert!(config.webhook.url.is_none());
        assert_eq!(config.board.url, defaults::board_url());
    }

    #[test]
    fn env_overrides_board_url() {
        let config = Config::default().with_env_from(|key| match key {
            BOARD_URL_ENV => Some("http://localhost:8080/board".to_string()),
            _ => None,
        });
        assert_eq!(config.board.url, "http://localhost:8080/board");
        assert_eq!(config.board.origin().unwrap(), "http://localhost:8080");
    }

    #[test]
    fn origin_derived_from_board_url() {
        let board = BoardConfig::default();
        assert_eq!(board.origin().unwrap(), "https://mirae.yonsei.ac.kr");

        let board = BoardConfig {
            origin: Some("https://example.com/".to_string()),
            ..BoardConfig::default()
        };
        assert_eq!(board.origin().unwrap(), "https://example.com");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [crawler]
            notify_delay_ms = 0

            [board.selectors]
            pinned_class = "sticky"
            "#,
        )
        .unwrap();

        assert_eq!(config.crawler.notify_delay_ms, 0);
        assert_eq!(config.board.selectors.pinned_class, "sticky");
        assert_eq!(config.board.selectors.row_selector, ".boardWrap > ul > li");
        assert_eq!(config.webhook.color, 0x003399);
        assert_eq!(config.paths.watermark_file, "lastId.json");
    }
}
