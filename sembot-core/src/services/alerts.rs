//! Whale-alert loop
//!
//! Polls the block-scan collaborator on a fixed interval and republishes
//! reported transfers to the notification sink. A failed tick is logged
//! and skipped; the loop itself never dies.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::domain::result::Result;
use crate::ports::{BlockScanner, NotificationSink, TransferDirection, WhaleTransfer};

/// Upper bound on one scan-and-notify pass so a stuck collaborator
/// cannot delay subsequent ticks indefinitely.
const TICK_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed-interval block-scan alert task.
pub struct AlertLoop {
    scanner: Arc<dyn BlockScanner>,
    sink: Arc<dyn NotificationSink>,
    interval: Duration,
}

impl AlertLoop {
    pub fn new(
        scanner: Arc<dyn BlockScanner>,
        sink: Arc<dyn NotificationSink>,
        interval: Duration,
    ) -> Self {
        Self {
            scanner,
            sink,
            interval,
        }
    }

    /// Run forever. Intended to be spawned as an independent task.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match tokio::time::timeout(TICK_TIMEOUT, self.poll_once()).await {
                Ok(Ok(emitted)) if emitted > 0 => {
                    tracing::info!(alerts = emitted, "published whale alerts");
                }
                Ok(Ok(_)) => {}
                Ok(Err(e)) => {
                    // Transient scan/chain-sync failures are expected
                    tracing::debug!(error = %e, "skipping alert tick");
                }
                Err(_) => {
                    tracing::warn!(
                        timeout_secs = TICK_TIMEOUT.as_secs(),
                        "alert tick timed out"
                    );
                }
            }
        }
    }

    /// One scan-and-publish pass; returns the number of alerts emitted.
    ///
    /// Emission order follows the collaborator's report order, and no
    /// deduplication happens here; the collaborator's cursor is the
    /// single source of truth for "already seen".
    pub async fn poll_once(&self) -> Result<usize> {
        let transfers = self.scanner.scan_new_block().await?;
        for transfer in &transfers {
            self.sink.notify(&format_alert(transfer)).await?;
        }
        Ok(transfers.len())
    }
}

/// Render one whale-alert message.
pub fn format_alert(transfer: &WhaleTransfer) -> String {
    match transfer.direction {
        TransferDirection::Deposited => format!(
            "**[whale alert]** {} SEM deposited to {} :inbox_tray:",
            transfer.value, transfer.exchange
        ),
        TransferDirection::Withdrawn => format!(
            "**[whale alert]** {} SEM withdrawn from {} :outbox_tray:",
            transfer.value, transfer.exchange
        ),
    }
}
