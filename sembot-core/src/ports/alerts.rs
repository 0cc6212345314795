//! Block-scan and notification ports for the whale-alert loop

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::result::Result;

/// Direction of a large transfer relative to a known exchange address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    Deposited,
    Withdrawn,
}

/// One large transfer reported by the block-scan collaborator.
#[derive(Debug, Clone)]
pub struct WhaleTransfer {
    pub direction: TransferDirection,
    /// Display units (SEM)
    pub value: Decimal,
    pub exchange: String,
}

/// External block-scan collaborator. It owns the "last scanned height"
/// cursor; the alert loop never deduplicates on its behalf.
#[async_trait]
pub trait BlockScanner: Send + Sync {
    /// Scan the next unprocessed block and report its large transfers.
    async fn scan_new_block(&self) -> Result<Vec<WhaleTransfer>>;
}

/// Outbound notification sink (one text message per alert event).
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, text: &str) -> Result<()>;
}
