// src/pipeline/run.rs

//! Single notification run.
//!
//! Load watermark → fetch → extract → diff → notify each → persist watermark.

use std::fmt;
use std::time::Duration;

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::diff::{calculate_diff, watermark_id};
use crate::services::{BoardSource, NoticeExtractor, NoticeNotifier};
use crate::storage::WatermarkStore;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every new notice was delivered and the watermark advanced
    Delivered { count: usize },
    /// Board checked, nothing newer than the watermark
    NoNewNotices,
    /// Board could not be fetched or parsed; nothing changed
    FetchFailed { reason: String },
    /// Some deliveries failed; the watermark advanced anyway
    DeliveryFailures { sent: usize, failed: usize },
    /// Dry run; nothing was sent or persisted
    DryRun { count: usize },
}

impl RunOutcome {
    /// Process exit code for a wrapping scheduler.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Delivered { .. } | Self::NoNewNotices | Self::DryRun { .. } => 0,
            Self::FetchFailed { .. } => 2,
            Self::DeliveryFailures { .. } => 3,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered { count } => write!(f, "delivered {count} notice(s)"),
            Self::NoNewNotices => write!(f, "no new notices"),
            Self::FetchFailed { reason } => write!(f, "board fetch failed: {reason}"),
            Self::DeliveryFailures { sent, failed } => {
                write!(f, "{sent} notice(s) delivered, {failed} failed")
            }
            Self::DryRun { count } => write!(f, "dry run, {count} notice(s) would be sent"),
        }
    }
}

/// Run the notice bot once.
///
/// Without a `notifier` the run is a dry run: new notices are only logged
/// and the watermark is left alone.
///
/// Only configuration errors and watermark write failures are returned as
/// `Err`. Board and delivery failures are reported through the outcome.
pub async fn run_notifier(
    config: &Config,
    source: &dyn BoardSource,
    notifier: Option<&dyn NoticeNotifier>,
    storage: &dyn WatermarkStore,
) -> Result<RunOutcome> {
    let extractor = NoticeExtractor::new(&config.board)?;
    let delay = Duration::from_millis(config.crawler.notify_delay_ms);

    log::info!("Checking for new notices...");

    // Step 1: Load watermark
    let last_notice = storage.load_watermark().await;
    let last_id = watermark_id(last_notice.as_ref());
    let last_label = last_notice
        .as_ref()
        .map_or_else(|| "none".to_string(), |n| n.id.clone());

    // Step 2: Fetch and extract
    let extracted = source
        .fetch_board()
        .await
        .and_then(|html| extractor.extract(&html, last_id));
    let extracted = match extracted {
        Ok(notices) => notices,
        Err(e) => {
            log::error!("Could not load the notice list from {}: {}", source.url(), e);
            return Ok(RunOutcome::FetchFailed {
                reason: e.to_string(),
            });
        }
    };

    // Step 3: Empty check
    if extracted.is_empty() {
        log::info!("No new notices.");
        match &last_notice {
            Some(n) => log::info!("Last notice: {} (ID: {})", n.title, n.id),
            None => log::info!("Last notice: none"),
        }
        return Ok(RunOutcome::NoNewNotices);
    }

    log::info!(
        "Latest notice ID: {} (previous: {})",
        extracted[0].id,
        last_label
    );

    // Step 4: Re-verify against the watermark
    let diff = calculate_diff(last_id, extracted);
    let Some(newest) = diff.newest().cloned() else {
        log::info!("No new notices.");
        return Ok(RunOutcome::NoNewNotices);
    };

    let total = diff.added.len();
    log::info!(
        "Found {} new notice(s) after ID {}. Sending notifications.",
        total,
        diff.watermark_id
    );

    // Step 5: Notify in order, paced
    let mut failed = 0;
    for (i, notice) in diff.added.iter().enumerate() {
        log::info!(
            "New notice [{}/{}]: {} (ID: {})",
            i + 1,
            total,
            notice.title,
            notice.id
        );

        let Some(notifier) = notifier else {
            log::info!("    {}", notice.link);
            continue;
        };

        if let Err(e) = notifier.notify(notice).await {
            failed += 1;
            log::error!("Discord notification failed for {}: {}", notice.id, e);
        }

        if i + 1 < total && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    if notifier.is_none() {
        log::info!("Dry run: watermark left at {}", last_label);
        return Ok(RunOutcome::DryRun { count: total });
    }

    // Step 6: Persist the newest notice
    storage.save_watermark(&newest).await?;
    log::info!("Watermark updated to {}", newest.id);

    if failed == 0 {
        Ok(RunOutcome::Delivered { count: total })
    } else {
        Ok(RunOutcome::DeliveryFailures {
            sent: total - failed,
            failed,
        })
    }
}
