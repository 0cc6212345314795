//! Integration tests for the wallet engine services
//!
//! Ledger and alert collaborators are faked at the trait level; wallet
//! storage uses real DuckDB.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use sembot_core::adapters::DuckDbWalletStore;
use sembot_core::domain::result::{Error, Result};
use sembot_core::domain::{AccountState, Wallet};
use sembot_core::ports::{
    BlockScanner, LedgerApi, NotificationSink, TransferDirection, WalletStore, WhaleTransfer,
};
use sembot_core::services::{
    AccountRegistry, AlertLoop, TransactionBuilder, TransferService,
};

const FEE: u64 = 5_000_000;
const SEM: u64 = 1_000_000_000;

// ============================================================================
// Test Helpers
// ============================================================================

#[derive(Default)]
struct FakeLedger {
    accounts: Mutex<HashMap<String, AccountState>>,
    submissions: Mutex<Vec<String>>,
    reject_reason: Mutex<Option<String>>,
}

impl FakeLedger {
    fn put_account(&self, address: &str, available: u64, nonce: u64, pending: u64) {
        self.accounts.lock().unwrap().insert(
            address.to_string(),
            AccountState {
                available,
                locked: 0,
                nonce,
                pending_transaction_count: pending,
            },
        );
    }

    fn reject_submissions_with(&self, reason: &str) {
        *self.reject_reason.lock().unwrap() = Some(reason.to_string());
    }

    fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl LedgerApi for FakeLedger {
    async fn fetch_account(&self, address: &str) -> Result<AccountState> {
        self.accounts
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .ok_or_else(|| Error::LedgerRejected("account not found".to_string()))
    }

    async fn submit_raw(&self, raw_hex: &str) -> Result<String> {
        if let Some(reason) = self.reject_reason.lock().unwrap().clone() {
            return Err(Error::LedgerRejected(reason));
        }
        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(raw_hex.to_string());
        Ok(format!("txhash{}", submissions.len()))
    }
}

struct Harness {
    ledger: Arc<FakeLedger>,
    store: Arc<DuckDbWalletStore>,
    registry: AccountRegistry,
    builder: TransactionBuilder,
    transfers: TransferService,
}

fn harness() -> Harness {
    let ledger = Arc::new(FakeLedger::default());
    let store = Arc::new(DuckDbWalletStore::open_in_memory().expect("open store"));
    store.ensure_schema().expect("schema");

    let store_port: Arc<dyn WalletStore> = store.clone();
    let ledger_port: Arc<dyn LedgerApi> = ledger.clone();

    let registry = AccountRegistry::new(store_port.clone());
    let builder = TransactionBuilder::new(ledger_port.clone(), 0, FEE);
    let transfers = TransferService::new(
        registry.clone(),
        builder.clone(),
        ledger_port,
        store_port,
    );

    Harness {
        ledger,
        store,
        registry,
        builder,
        transfers,
    }
}

/// Provision a wallet and register its ledger account.
async fn funded_wallet(h: &Harness, user: &str, available: u64, nonce: u64, pending: u64) -> Wallet {
    let wallet = h.registry.get_or_create(user, user).await.unwrap();
    h.ledger.put_account(&wallet.address, available, nonce, pending);
    wallet
}

// ============================================================================
// TransactionBuilder
// ============================================================================

#[tokio::test]
async fn test_build_converts_display_amount_to_minor_units() {
    let h = harness();
    let sender = funded_wallet(&h, "alice", 100 * SEM, 0, 0).await;
    let recipient = funded_wallet(&h, "bob", 0, 0, 0).await;

    let tx = h
        .builder
        .build(&sender, &recipient.address, "2.5", None)
        .await
        .unwrap();
    assert_eq!(tx.amount(), 2_500_000_000);
    assert_eq!(tx.fee(), FEE);
}

#[tokio::test]
async fn test_send_everything_deducts_fee_from_amount() {
    let h = harness();
    let sender = funded_wallet(&h, "alice", 10 * SEM, 0, 0).await;
    let recipient = funded_wallet(&h, "bob", 0, 0, 0).await;

    // Balance 10.0 SEM, fee 0.005 SEM, request "10.0": the fee comes out
    // of the amount and the transfer goes through at 9.995 SEM.
    let tx = h
        .builder
        .build(&sender, &recipient.address, "10.0", None)
        .await
        .unwrap();
    assert_eq!(tx.amount(), 9_995_000_000);
}

#[tokio::test]
async fn test_amount_within_fee_of_balance_stays_insufficient() {
    let h = harness();
    let sender = funded_wallet(&h, "alice", 10 * SEM, 0, 0).await;
    let recipient = funded_wallet(&h, "bob", 0, 0, 0).await;

    // 9.999 + fee > 10.0 but 9.999 != 10.0, so no auto-adjustment
    let result = h
        .builder
        .build(&sender, &recipient.address, "9.999", None)
        .await;
    assert!(matches!(result, Err(Error::InsufficientBalance { .. })));
}

#[tokio::test]
async fn test_exact_balance_below_fee_stays_insufficient() {
    let h = harness();
    // The whole balance is smaller than the fee, so the send-everything
    // deduction has nothing to take the fee from.
    let sender = funded_wallet(&h, "alice", 1_000_000, 0, 0).await;
    let recipient = funded_wallet(&h, "bob", 0, 0, 0).await;

    let result = h
        .builder
        .build(&sender, &recipient.address, "0.001", None)
        .await;
    assert!(matches!(result, Err(Error::InsufficientBalance { .. })));
}

#[tokio::test]
async fn test_nonce_is_confirmed_plus_pending() {
    let h = harness();
    let sender = funded_wallet(&h, "alice", 100 * SEM, 5, 2).await;
    let recipient = funded_wallet(&h, "bob", 0, 0, 0).await;

    let tx = h
        .builder
        .build(&sender, &recipient.address, "1", None)
        .await
        .unwrap();
    assert_eq!(tx.nonce(), 7);
}

#[tokio::test]
async fn test_memo_bytes() {
    let h = harness();
    let sender = funded_wallet(&h, "alice", 100 * SEM, 0, 0).await;
    let recipient = funded_wallet(&h, "bob", 0, 0, 0).await;

    let with_comment = h
        .builder
        .build(&sender, &recipient.address, "1", Some("gg"))
        .await
        .unwrap();
    assert_eq!(with_comment.data(), b"gg");
    assert_eq!(hex::encode(with_comment.data()), "6767");

    let without_comment = h
        .builder
        .build(&sender, &recipient.address, "1", None)
        .await
        .unwrap();
    assert_eq!(hex::encode(without_comment.data()), "746970");
}

#[tokio::test]
async fn test_unknown_recipient_is_invalid_not_infrastructure() {
    let h = harness();
    let sender = funded_wallet(&h, "alice", 100 * SEM, 0, 0).await;

    let result = h
        .builder
        .build(
            &sender,
            "0x1111111111111111111111111111111111111111",
            "1",
            None,
        )
        .await;
    assert!(matches!(result, Err(Error::InvalidRecipient)));
}

#[tokio::test]
async fn test_zero_and_garbage_amounts_rejected() {
    let h = harness();
    let sender = funded_wallet(&h, "alice", 100 * SEM, 0, 0).await;
    let recipient = funded_wallet(&h, "bob", 0, 0, 0).await;

    for bad in ["0", "abc", "-3"] {
        let result = h.builder.build(&sender, &recipient.address, bad, None).await;
        assert!(
            matches!(result, Err(Error::InvalidAmount(_))),
            "expected InvalidAmount for {:?}",
            bad
        );
    }
}

// ============================================================================
// TransferService
// ============================================================================

#[tokio::test]
async fn test_transfer_returns_hash_on_success() {
    let h = harness();
    let _sender = funded_wallet(&h, "alice", 100 * SEM, 0, 0).await;
    let recipient = funded_wallet(&h, "bob", 0, 0, 0).await;

    let reply = h
        .transfers
        .transfer("alice", &recipient.address, "1.5", Some("gg"))
        .await;
    assert!(!reply.error, "unexpected failure: {:?}", reply.reason);
    assert_eq!(reply.data.unwrap().hash, "txhash1");
    assert_eq!(h.ledger.submission_count(), 1);
}

#[tokio::test]
async fn test_transfer_without_wallet_fails_closed() {
    let h = harness();
    let recipient = funded_wallet(&h, "bob", 0, 0, 0).await;

    let reply = h
        .transfers
        .transfer("stranger", &recipient.address, "1", None)
        .await;
    assert!(reply.error);
    assert!(reply.reason.unwrap().contains("don't have an account"));
    assert_eq!(h.ledger.submission_count(), 0);
}

#[tokio::test]
async fn test_insufficient_balance_reports_available_in_display_units() {
    let h = harness();
    let _sender = funded_wallet(&h, "alice", SEM, 0, 0).await;
    let recipient = funded_wallet(&h, "bob", 0, 0, 0).await;

    let reply = h
        .transfers
        .transfer("alice", &recipient.address, "5.0", None)
        .await;
    assert!(reply.error);
    assert!(reply.reason.unwrap().contains("1.000000000 SEM"));
}

#[tokio::test]
async fn test_duplicate_rejection_surfaces_as_already_processed() {
    let h = harness();
    let _sender = funded_wallet(&h, "alice", 100 * SEM, 0, 0).await;
    let recipient = funded_wallet(&h, "bob", 0, 0, 0).await;
    h.ledger
        .reject_submissions_with("transaction already processed");

    let reply = h
        .transfers
        .transfer("alice", &recipient.address, "1", None)
        .await;
    assert!(reply.error);
    assert!(reply.reason.unwrap().contains("already processed"));
}

#[tokio::test]
async fn test_nonce_conflict_rejection_suggests_retry() {
    let h = harness();
    let _sender = funded_wallet(&h, "alice", 100 * SEM, 0, 0).await;
    let recipient = funded_wallet(&h, "bob", 0, 0, 0).await;
    h.ledger.reject_submissions_with("invalid transaction nonce");

    let reply = h
        .transfers
        .transfer("alice", &recipient.address, "1", None)
        .await;
    assert!(reply.error);
    assert!(reply.reason.unwrap().contains("try again"));
}

#[tokio::test]
async fn test_malformed_recipient_address() {
    let h = harness();
    let _sender = funded_wallet(&h, "alice", 100 * SEM, 0, 0).await;

    let reply = h.transfers.transfer("alice", "0x123", "1", None).await;
    assert!(reply.error);
    assert!(reply.reason.unwrap().contains("not valid"));
}

#[tokio::test]
async fn test_get_or_create_address_is_idempotent() {
    let h = harness();

    let first = h.transfers.get_or_create_address("alice", "alice").await;
    assert!(!first.error);
    let first = first.data.unwrap();
    assert!(first.created);

    let second = h.transfers.get_or_create_address("alice", "alice").await;
    let second = second.data.unwrap();
    assert!(!second.created);
    assert_eq!(first.address, second.address);
}

#[tokio::test]
async fn test_concurrent_address_requests_report_one_creation() {
    let h = harness();

    let (a, b) = tokio::join!(
        h.transfers.get_or_create_address("newuser", "newuser"),
        h.transfers.get_or_create_address("newuser", "newuser"),
    );
    let (a, b) = (a.data.unwrap(), b.data.unwrap());
    assert_eq!(a.address, b.address);
    // Exactly one caller created the wallet, whichever way they raced
    assert!(a.created ^ b.created);
}

#[tokio::test]
async fn test_concurrent_provisioning_yields_one_wallet() {
    let h = harness();

    let (a, b) = tokio::join!(
        h.registry.get_or_create("newuser", "newuser"),
        h.registry.get_or_create("newuser", "newuser"),
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.address, b.address);
    assert_eq!(a.private_key, b.private_key);

    let stored = h.store.find("newuser").await.unwrap().unwrap();
    assert_eq!(stored.address, a.address);
}

#[tokio::test]
async fn test_balance_reply() {
    let h = harness();
    let _wallet = funded_wallet(&h, "alice", 10 * SEM, 0, 0).await;

    let reply = h.transfers.get_balance("alice").await;
    assert!(!reply.error);
    let info = reply.data.unwrap();
    assert_eq!(info.available, "10.000000000");
    assert!(!info.empty);

    let _empty = funded_wallet(&h, "carol", 0, 0, 0).await;
    let reply = h.transfers.get_balance("carol").await;
    assert!(reply.data.unwrap().empty);
}

#[tokio::test]
async fn test_tip_statistics_feed_leaderboards() {
    let h = harness();
    let _a = funded_wallet(&h, "alice", 100 * SEM, 0, 0).await;
    let _b = funded_wallet(&h, "bob", 0, 0, 0).await;

    h.transfers.record_tip("alice", "bob", "2.5").await;
    h.transfers.record_tip("alice", "bob", "1.5").await;

    let senders = h.transfers.top_senders(10).await.data.unwrap();
    assert_eq!(senders.len(), 1);
    assert_eq!(senders[0].display_name, "alice");
    assert_eq!(senders[0].total, Decimal::from(4));

    let recipients = h.transfers.top_recipients(10).await.data.unwrap();
    assert_eq!(recipients[0].display_name, "bob");
    assert_eq!(recipients[0].total, Decimal::from(4));
}

// ============================================================================
// AlertLoop
// ============================================================================

struct FakeScanner {
    responses: Mutex<Vec<Result<Vec<WhaleTransfer>>>>,
}

impl FakeScanner {
    fn new(responses: Vec<Result<Vec<WhaleTransfer>>>) -> Self {
        Self {
            responses: Mutex::new(responses),
        }
    }
}

#[async_trait]
impl BlockScanner for FakeScanner {
    async fn scan_new_block(&self) -> Result<Vec<WhaleTransfer>> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(vec![])
        } else {
            responses.remove(0)
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, text: &str) -> Result<()> {
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn whale(direction: TransferDirection, value: u64, exchange: &str) -> WhaleTransfer {
    WhaleTransfer {
        direction,
        value: Decimal::from(value),
        exchange: exchange.to_string(),
    }
}

#[tokio::test]
async fn test_scan_error_emits_nothing_and_loop_survives() {
    let scanner = Arc::new(FakeScanner::new(vec![
        Err(Error::Scan("chain sync lag".to_string())),
        Ok(vec![whale(TransferDirection::Deposited, 250_000, "KuCoin")]),
    ]));
    let sink = Arc::new(RecordingSink::default());
    let alerts = AlertLoop::new(
        scanner,
        sink.clone(),
        std::time::Duration::from_millis(10),
    );

    // Errored tick: nothing emitted
    assert!(alerts.poll_once().await.is_err());
    assert!(sink.messages.lock().unwrap().is_empty());

    // Next tick proceeds normally
    assert_eq!(alerts.poll_once().await.unwrap(), 1);
    assert_eq!(sink.messages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_alerts_emitted_in_collaborator_order() {
    let scanner = Arc::new(FakeScanner::new(vec![Ok(vec![
        whale(TransferDirection::Deposited, 250_000, "KuCoin"),
        whale(TransferDirection::Withdrawn, 80_000, "Stex"),
    ])]));
    let sink = Arc::new(RecordingSink::default());
    let alerts = AlertLoop::new(
        scanner,
        sink.clone(),
        std::time::Duration::from_millis(10),
    );

    assert_eq!(alerts.poll_once().await.unwrap(), 2);
    let messages = sink.messages.lock().unwrap();
    assert_eq!(
        messages[0],
        "**[whale alert]** 250000 SEM deposited to KuCoin :inbox_tray:"
    );
    assert_eq!(
        messages[1],
        "**[whale alert]** 80000 SEM withdrawn from Stex :outbox_tray:"
    );
}
