//! Transaction builder - fee/nonce/amount arithmetic and signing

use std::sync::Arc;

use chrono::Utc;

use crate::codec;
use crate::domain::result::{Error, Result};
use crate::domain::transaction::{SignedTransaction, UnsignedTransaction, TX_TYPE_TRANSFER};
use crate::domain::Wallet;
use crate::ports::LedgerApi;

/// Builds and signs transfer transactions against a fresh ledger
/// snapshot. No retries happen here; every failure goes back to the
/// caller for a decision.
#[derive(Clone)]
pub struct TransactionBuilder {
    ledger: Arc<dyn LedgerApi>,
    network: u8,
    /// Fixed inclusion fee, minor units
    fee: u64,
}

impl TransactionBuilder {
    pub fn new(ledger: Arc<dyn LedgerApi>, network: u8, fee: u64) -> Self {
        Self {
            ledger,
            network,
            fee,
        }
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    /// Build and sign a transfer from `sender` to `recipient`.
    ///
    /// The nonce comes from one fresh account read
    /// (confirmed + pending); nothing locks between that read and the
    /// broadcast, so concurrent transfers from one wallet can collide
    /// and the node rejects the loser.
    pub async fn build(
        &self,
        sender: &Wallet,
        recipient: &str,
        display_amount: &str,
        memo: Option<&str>,
    ) -> Result<SignedTransaction> {
        let to = codec::address_to_bytes(recipient)?;

        // The recipient must resolve to a real ledger account. A node-side
        // rejection means an unknown address; transport failures stay
        // infrastructure errors.
        match self.ledger.fetch_account(&codec::address_to_hex(&to)).await {
            Ok(_) => {}
            Err(Error::LedgerRejected(_)) => return Err(Error::InvalidRecipient),
            Err(e) => return Err(e),
        }

        let mut amount = codec::to_minor_units(display_amount)?;
        if amount == 0 {
            return Err(Error::InvalidAmount(display_amount.to_string()));
        }

        let state = self.ledger.fetch_account(&sender.address).await?;

        // Send-everything edge case: when the request matches the available
        // balance exactly, the fee comes out of the amount. Requests merely
        // within one fee of the balance stay insufficient; that boundary is
        // deliberate.
        if amount == state.available {
            amount = match amount.checked_sub(self.fee) {
                Some(adjusted) => adjusted,
                None => {
                    return Err(Error::InsufficientBalance {
                        available: codec::format_sem(state.available),
                    })
                }
            };
        }

        let required = amount
            .checked_add(self.fee)
            .ok_or_else(|| Error::InvalidAmount(display_amount.to_string()))?;
        if state.available < required {
            return Err(Error::InsufficientBalance {
                available: codec::format_sem(state.available),
            });
        }

        let tx = UnsignedTransaction {
            network: self.network,
            tx_type: TX_TYPE_TRANSFER,
            recipient: to,
            amount,
            fee: self.fee,
            nonce: state.next_nonce(),
            timestamp: Utc::now().timestamp_millis() as u64,
            data: codec::encode_memo(memo),
        };

        tx.sign(&sender.private_key).map_err(|e| {
            tracing::error!(user = sender.user_id.as_str(), error = %e, "wallet key material is corrupted");
            e
        })
    }
}
