//! Ledger node port - account state reads and transaction submission

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::AccountState;

/// Remote ledger node abstraction. Pure request/response, no local state.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Fetch the current state of an account.
    ///
    /// `LedgerUnreachable` on network/timeout failure,
    /// `LedgerMalformedResponse` on an undecodable body,
    /// `LedgerRejected` when the node answers with an error payload
    /// (including unknown addresses).
    async fn fetch_account(&self, address: &str) -> Result<AccountState>;

    /// Submit a hex-encoded serialized signed transaction; returns the
    /// transaction hash on acceptance.
    ///
    /// Submission is not exactly-once: if the response is lost after
    /// the node accepted, a retry with the same nonce is rejected as a
    /// duplicate (`LedgerRejected` with a duplicate reason).
    async fn submit_raw(&self, raw_hex: &str) -> Result<String>;
}
