// src/models/selectors.rs

//! CSS selectors for scraping the notice board list.

use serde::{Deserialize, Serialize};

/// CSS selectors and text labels for the board list markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSelectors {
    /// Selector for each entry in the notice list
    #[serde(default = "defaults::row")]
    pub row_selector: String,

    /// Class that marks an entry as pinned to the top of the board
    #[serde(default = "defaults::pinned_class")]
    pub pinned_class: String,

    /// Selector for the sequence number within an entry
    #[serde(default = "defaults::id")]
    pub id_selector: String,

    /// Selector for the title element within an entry
    #[serde(default = "defaults::title")]
    pub title_selector: String,

    /// Selector for the link element within an entry
    #[serde(default = "defaults::link")]
    pub link_selector: String,

    /// HTML attribute name for extracting links (usually "href")
    #[serde(default = "defaults::attr_name")]
    pub attr_name: String,

    /// Selector for the category label
    #[serde(default = "defaults::category")]
    pub category_selector: String,

    /// Selector for the publish date area
    #[serde(default = "defaults::date")]
    pub date_selector: String,

    /// Selector for the validity period area
    ///
    /// The default does not match the live board markup, so the period
    /// comes out empty.
    #[serde(default = "defaults::period")]
    pub period_selector: String,

    /// Label stripped from the publish date text
    #[serde(default = "defaults::date_label")]
    pub date_label: String,

    /// Label stripped from the validity period text
    #[serde(default = "defaults::period_label")]
    pub period_label: String,
}

impl Default for BoardSelectors {
    fn default() -> Self {
        Self {
            row_selector: defaults::row(),
            pinned_class: defaults::pinned_class(),
            id_selector: defaults::id(),
            title_selector: defaults::title(),
            link_selector: defaults::link(),
            attr_name: defaults::attr_name(),
            category_selector: defaults::category(),
            date_selector: defaults::date(),
            period_selector: defaults::period(),
            date_label: defaults::date_label(),
            period_label: defaults::period_label(),
        }
    }
}

impl BoardSelectors {
    /// All selector strings with their config key, for validation.
    pub fn selector_entries(&self) -> [(&'static str, &str); 7] {
        [
            ("row_selector", self.row_selector.as_str()),
            ("id_selector", self.id_selector.as_str()),
            ("title_selector", self.title_selector.as_str()),
            ("link_selector", self.link_selector.as_str()),
            ("category_selector", self.category_selector.as_str()),
            ("date_selector", self.date_selector.as_str()),
            ("period_selector", self.period_selector.as_str()),
        ]
    }
}

mod defaults {
    pub fn row() -> String {
        ".boardWrap > ul > li".into()
    }
    pub fn pinned_class() -> String {
        "board-noti".into()
    }
    pub fn id() -> String {
        ".num span".into()
    }
    pub fn title() -> String {
        ".title strong".into()
    }
    pub fn link() -> String {
        "a".into()
    }
    pub fn attr_name() -> String {
        "href".into()
    }
    pub fn category() -> String {
        ".typeCL".into()
    }
    pub fn date() -> String {
        ".date-area".into()
    }
    pub fn period() -> String {
        ".date-area last".into()
    }
    pub fn date_label() -> String {
        "작성일".into()
    }
    pub fn period_label() -> String {
        "기간".into()
    }
}
