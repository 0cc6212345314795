//! Wallet store port - durable user → wallet mapping

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::Wallet;

/// Cumulative tip totals for one user, used by the leaderboards.
#[derive(Debug, Clone)]
pub struct TipTotal {
    pub display_name: String,
    pub total: Decimal,
}

/// Durable wallet storage abstraction.
///
/// The store is the only shared durable state in the engine. It is
/// responsible for per-user-id atomicity on creation: two concurrent
/// `create_if_absent` calls for the same new user must resolve to a
/// single stored wallet.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Look up a wallet by external user id. Pure read.
    async fn find(&self, user_id: &str) -> Result<Option<Wallet>>;

    /// Insert the wallet unless a row for its user id already exists,
    /// then return the stored row. On a lost creation race the earlier
    /// winner's wallet comes back and the argument is discarded.
    async fn create_if_absent(&self, wallet: &Wallet) -> Result<Wallet>;

    /// Accumulate sent/received display-unit totals after a successful tip.
    async fn record_tip(&self, sender_id: &str, recipient_id: &str, amount: Decimal)
        -> Result<()>;

    /// Users ranked by cumulative sent amount, descending.
    async fn top_senders(&self, limit: usize) -> Result<Vec<TipTotal>>;

    /// Users ranked by cumulative received amount, descending.
    async fn top_recipients(&self, limit: usize) -> Result<Vec<TipTotal>>;
}
