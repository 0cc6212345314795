//! Ledger-sourced account state

use serde::{Deserialize, Serialize};

/// Snapshot of an account as reported by the ledger node.
///
/// Fetched fresh on every balance check and transfer attempt and never
/// cached: the nonce and pending count move underneath us between user
/// actions. All amounts are minor units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountState {
    pub available: u64,
    pub locked: u64,
    /// Confirmed transaction sequence number
    pub nonce: u64,
    /// Transactions accepted by the node but not yet in a block
    pub pending_transaction_count: u64,
}

impl AccountState {
    /// Nonce to use for the next transaction: confirmed nonce advanced
    /// past everything already pending. Best-effort ordering only; two
    /// unserialized concurrent builds from the same wallet can still
    /// pick the same value, and the node rejects the loser.
    pub fn next_nonce(&self) -> u64 {
        self.nonce + self.pending_transaction_count
    }
}
