//! Transfer service - the externally-invoked entry point
//!
//! Orchestrates registry → builder → ledger submission and converts
//! every engine error into a `Reply` the command layer can render
//! directly. Nothing raises across this boundary.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::codec;
use crate::domain::result::{Error, Reply, Result};
use crate::ports::{LedgerApi, TipTotal, WalletStore};
use crate::services::builder::TransactionBuilder;
use crate::services::registry::AccountRegistry;

/// Successful transfer payload
#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    pub hash: String,
}

/// Deposit address payload
#[derive(Debug, Clone, Serialize)]
pub struct AddressInfo {
    pub address: String,
    /// True when this call provisioned the wallet
    pub created: bool,
}

/// Balance payload, display units
#[derive(Debug, Clone, Serialize)]
pub struct BalanceInfo {
    pub available: String,
    pub locked: String,
    pub total: String,
    pub empty: bool,
}

/// Entry point for tip and withdraw operations.
pub struct TransferService {
    registry: AccountRegistry,
    builder: TransactionBuilder,
    ledger: Arc<dyn LedgerApi>,
    store: Arc<dyn WalletStore>,
}

impl TransferService {
    pub fn new(
        registry: AccountRegistry,
        builder: TransactionBuilder,
        ledger: Arc<dyn LedgerApi>,
        store: Arc<dyn WalletStore>,
    ) -> Self {
        Self {
            registry,
            builder,
            ledger,
            store,
        }
    }

    /// Send `display_amount` SEM from a user's wallet to a recipient
    /// address. Succeeds with the broadcast transaction hash; after a
    /// successful broadcast the operation cannot be undone here.
    pub async fn transfer(
        &self,
        sender_user_id: &str,
        recipient_address: &str,
        display_amount: &str,
        memo: Option<&str>,
    ) -> Reply<TransferReceipt> {
        match self
            .transfer_inner(sender_user_id, recipient_address, display_amount, memo)
            .await
        {
            Ok(hash) => Reply::ok(TransferReceipt { hash }),
            Err(e) => failure_reply(e),
        }
    }

    async fn transfer_inner(
        &self,
        sender_user_id: &str,
        recipient_address: &str,
        display_amount: &str,
        memo: Option<&str>,
    ) -> Result<String> {
        let wallet = self
            .registry
            .find(sender_user_id)
            .await?
            .ok_or_else(|| Error::NoWallet(sender_user_id.to_string()))?;

        let tx = self
            .builder
            .build(&wallet, recipient_address, display_amount, memo)
            .await?;
        let hash = self.ledger.submit_raw(&tx.to_hex()).await?;

        tracing::info!(
            user = sender_user_id,
            hash = hash.as_str(),
            nonce = tx.nonce(),
            "transfer broadcast"
        );
        Ok(hash)
    }

    /// Return the user's deposit address, provisioning a wallet on
    /// first request.
    pub async fn get_or_create_address(
        &self,
        user_id: &str,
        display_name: &str,
    ) -> Reply<AddressInfo> {
        match self.registry.provision(user_id, display_name).await {
            Ok((wallet, created)) => Reply::ok(AddressInfo {
                address: wallet.address,
                created,
            }),
            Err(e) => failure_reply(e),
        }
    }

    /// Fetch the user's current balance from the ledger.
    pub async fn get_balance(&self, user_id: &str) -> Reply<BalanceInfo> {
        match self.balance_inner(user_id).await {
            Ok(info) => Reply::ok(info),
            Err(e) => failure_reply(e),
        }
    }

    async fn balance_inner(&self, user_id: &str) -> Result<BalanceInfo> {
        let wallet = self
            .registry
            .find(user_id)
            .await?
            .ok_or_else(|| Error::NoWallet(user_id.to_string()))?;

        let state = self.ledger.fetch_account(&wallet.address).await?;
        let total = state.available.saturating_add(state.locked);

        Ok(BalanceInfo {
            available: codec::format_sem(state.available),
            locked: codec::format_sem(state.locked),
            total: codec::format_sem(total),
            empty: total == 0,
        })
    }

    /// Accumulate tip statistics after a successful user-to-user tip.
    /// Failures here only cost leaderboard accuracy, never funds.
    pub async fn record_tip(
        &self,
        sender_user_id: &str,
        recipient_user_id: &str,
        display_amount: &str,
    ) {
        let amount: Decimal = match display_amount.trim().replace(',', ".").parse() {
            Ok(a) => a,
            Err(_) => return,
        };
        if let Err(e) = self
            .store
            .record_tip(sender_user_id, recipient_user_id, amount)
            .await
        {
            tracing::warn!(error = %e, "failed to record tip statistics");
        }
    }

    /// Top users by cumulative sent amount.
    pub async fn top_senders(&self, limit: usize) -> Reply<Vec<TipEntry>> {
        match self.store.top_senders(limit).await {
            Ok(rows) => Reply::ok(rows.into_iter().map(TipEntry::from).collect()),
            Err(e) => failure_reply(e),
        }
    }

    /// Top users by cumulative received amount.
    pub async fn top_recipients(&self, limit: usize) -> Reply<Vec<TipEntry>> {
        match self.store.top_recipients(limit).await {
            Ok(rows) => Reply::ok(rows.into_iter().map(TipEntry::from).collect()),
            Err(e) => failure_reply(e),
        }
    }
}

/// Serializable leaderboard row
#[derive(Debug, Clone, Serialize)]
pub struct TipEntry {
    pub display_name: String,
    pub total: Decimal,
}

impl From<TipTotal> for TipEntry {
    fn from(t: TipTotal) -> Self {
        Self {
            display_name: t.display_name,
            total: t.total,
        }
    }
}

/// Convert an engine error to a user-renderable reply, logging per the
/// propagation policy: validation errors stay quiet, infrastructure
/// failures are logged without reaching the user verbatim, signing
/// faults are loud.
fn failure_reply<T>(err: Error) -> Reply<T> {
    match &err {
        Error::SigningFailed(detail) => {
            tracing::error!(detail = detail.as_str(), "signing failure, key material suspect");
        }
        Error::LedgerUnreachable(detail)
        | Error::LedgerMalformedResponse(detail)
        | Error::Store(detail) => {
            tracing::warn!(detail = detail.as_str(), "infrastructure failure during wallet operation");
        }
        Error::LedgerRejected(reason) => {
            tracing::info!(reason = reason.as_str(), "ledger rejected submission");
        }
        _ => {}
    }
    Reply::fail(err.user_reason())
}
