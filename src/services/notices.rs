// src/services/notices.rs

//! Notice extraction service.
//!
//! Parses the board list page into notices newer than the watermark.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{BoardConfig, Notice, NoticeInfo, parse_id};
use crate::utils::text::{normalize_whitespace, strip_label};
use crate::utils::url::absolute_link;

/// Service for extracting notices from the board list markup.
#[derive(Debug)]
pub struct NoticeExtractor {
    row: Selector,
    row_source: String,
    id: Selector,
    title: Selector,
    link: Selector,
    category: Selector,
    date: Selector,
    period: Selector,
    pinned_class: String,
    attr_name: String,
    date_label: String,
    period_label: String,
    origin: String,
    link_suffix: String,
    board_url: String,
}

impl NoticeExtractor {
    /// Compile the board selectors.
    pub fn new(board: &BoardConfig) -> Result<Self> {
        let s = &board.selectors;
        Ok(Self {
            row: Self::parse_selector(&s.row_selector)?,
            row_source: s.row_selector.clone(),
            id: Self::parse_selector(&s.id_selector)?,
            title: Self::parse_selector(&s.title_selector)?,
            link: Self::parse_selector(&s.link_selector)?,
            category: Self::parse_selector(&s.category_selector)?,
            date: Self::parse_selector(&s.date_selector)?,
            period: Self::parse_selector(&s.period_selector)?,
            pinned_class: s.pinned_class.clone(),
            attr_name: s.attr_name.clone(),
            date_label: s.date_label.clone(),
            period_label: s.period_label.clone(),
            origin: board.origin()?,
            link_suffix: board.link_suffix.clone(),
            board_url: board.url.clone(),
        })
    }

    /// Extract notices whose id is strictly greater than `last_saved_id`.
    ///
    /// Every entry is scanned, so pinned or out-of-order entries never cut
    /// the result short. The result is sorted newest first by numeric id.
    /// Fails only when the page has no board entries at all.
    pub fn extract(&self, html: &str, last_saved_id: u64) -> Result<Vec<Notice>> {
        let document = Html::parse_document(html);

        let mut row_count = 0;
        let mut found: Vec<(u64, Notice)> = Vec::new();

        for row in document.select(&self.row) {
            row_count += 1;

            if self.is_pinned(&row) {
                log::debug!("Skipping pinned entry: {}", self.text_of(&row, &self.title));
                continue;
            }

            let id = self.text_of(&row, &self.id);
            let Some(numeric_id) = parse_id(&id) else {
                if id.is_empty() {
                    log::debug!("Skipping entry without an id");
                } else {
                    log::warn!("Skipping entry with unparseable id '{}'", id);
                }
                continue;
            };
            if numeric_id <= last_saved_id {
                continue;
            }

            if let Some(notice) = self.parse_row(&row, id) {
                found.push((numeric_id, notice));
            }
        }

        if row_count == 0 {
            return Err(AppError::parse(format!(
                "no board entries matched '{}'",
                self.row_source
            )));
        }

        found.sort_by(|a, b| b.0.cmp(&a.0));
        let notices: Vec<Notice> = found.into_iter().map(|(_, notice)| notice).collect();

        log::debug!(
            "Scanned {} entries, {} newer than {}",
            row_count,
            notices.len(),
            last_saved_id
        );
        Ok(notices)
    }

    fn parse_row(&self, row: &ElementRef, id: String) -> Option<Notice> {
        let title = self.text_of(row, &self.title);
        if title.is_empty() {
            log::debug!("Skipping entry {} without title", id);
            return None;
        }

        let link = row
            .select(&self.link)
            .filter_map(|a| a.value().attr(&self.attr_name))
            .find_map(|href| absolute_link(&self.origin, href, &self.link_suffix))
            .unwrap_or_else(|| self.board_url.clone());

        let info = NoticeInfo {
            type_cl: self.text_of(row, &self.category),
            date: strip_label(&self.raw_text_of(row, &self.date), &self.date_label),
            date_last: strip_label(&self.raw_text_of(row, &self.period), &self.period_label),
        };

        Some(Notice {
            id,
            title,
            link,
            info,
        })
    }

    fn is_pinned(&self, row: &ElementRef) -> bool {
        row.value().classes().any(|c| c == self.pinned_class)
    }

    /// Whitespace-normalized text of the first match, or empty.
    fn text_of(&self, row: &ElementRef, selector: &Selector) -> String {
        normalize_whitespace(&self.raw_text_of(row, selector))
    }

    fn raw_text_of(&self, row: &ElementRef, selector: &Selector) -> String {
        row.select(selector)
            .next()
            .map(|el| el.text().collect())
            .unwrap_or_default()
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}
