//! Watermark diff.
//!
//! Decides which extracted notices are newer than the stored watermark.

use crate::models::Notice;

/// Notices selected for delivery in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Numeric id of the watermark the diff was taken against
    pub watermark_id: u64,
    /// New notices, newest first
    pub added: Vec<Notice>,
}

impl DiffResult {
    /// Check if there are any new notices.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty()
    }

    /// The notice that becomes the next watermark.
    pub fn newest(&self) -> Option<&Notice> {
        self.added.first()
    }
}

/// Numeric threshold of a stored watermark.
///
/// An absent watermark is `0`. So is one whose id is not numeric, which
/// means everything currently on the board counts as new.
pub fn watermark_id(watermark: Option<&Notice>) -> u64 {
    match watermark {
        None => 0,
        Some(notice) => notice.numeric_id().unwrap_or_else(|| {
            log::warn!(
                "Stored watermark id '{}' is not numeric. Treating as no history.",
                notice.id
            );
            0
        }),
    }
}

/// Select the extracted notices newer than `watermark_id`.
///
/// `extracted` is expected newest first. Nothing is selected unless its first
/// element is strictly newer than the watermark.
pub fn calculate_diff(watermark_id: u64, extracted: Vec<Notice>) -> DiffResult {
    let newest_is_new = extracted
        .first()
        .and_then(Notice::numeric_id)
        .is_some_and(|id| id > watermark_id);

    let added = if newest_is_new {
        extracted
            .into_iter()
            .filter(|n| n.numeric_id().is_some_and(|id| id > watermark_id))
            .collect()
    } else {
        Vec::new()
    };

    DiffResult {
        watermark_id,
        added,
    }
}
