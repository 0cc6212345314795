//! Sembot Core - custodial wallet and transfer engine for the SEM ledger
//!
//! This crate implements the wallet engine following hexagonal architecture:
//!
//! - **domain**: Core entities (Wallet, AccountState, SignedTransaction)
//! - **codec**: Address and minor-unit amount conversions
//! - **ports**: Trait definitions for external collaborators
//!   (WalletStore, LedgerApi, BlockScanner, NotificationSink)
//! - **services**: Business logic orchestration (registry, builder,
//!   transfer service, alert loop)
//! - **adapters**: Concrete implementations (DuckDB store, HTTP ledger
//!   client, scan/webhook clients)

pub mod adapters;
pub mod codec;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};

use adapters::{DuckDbWalletStore, HttpBlockScanner, HttpLedgerClient, WebhookNotifier};
use config::Config;
use ports::{LedgerApi, WalletStore};
use services::{AccountRegistry, AlertLoop, TransactionBuilder, TransferService};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Reply};
pub use domain::{AccountState, SignedTransaction, Wallet};

/// Main context for wallet engine operations.
///
/// Constructed once at startup and passed by reference to all handlers;
/// there are no ambient singletons.
pub struct SembotContext {
    pub config: Config,
    pub store: Arc<DuckDbWalletStore>,
    pub ledger: Arc<HttpLedgerClient>,
    pub registry: AccountRegistry,
    pub transfers: TransferService,
}

impl SembotContext {
    /// Create a new engine context rooted at a data directory.
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;

        let store = Arc::new(DuckDbWalletStore::new(&data_dir.join("sembot.duckdb"))?);
        store.ensure_schema()?;

        let ledger = Arc::new(HttpLedgerClient::new(&config.api_base_url)?);

        let store_port: Arc<dyn WalletStore> = store.clone();
        let ledger_port: Arc<dyn LedgerApi> = ledger.clone();

        let registry = AccountRegistry::new(store_port.clone());
        let builder =
            TransactionBuilder::new(ledger_port.clone(), config.network_id, config.fee_minor);
        let transfers =
            TransferService::new(registry.clone(), builder, ledger_port, store_port);

        Ok(Self {
            config,
            store,
            ledger,
            registry,
            transfers,
        })
    }

    /// Build the whale-alert loop from the configured scan endpoint and
    /// notification webhook. Fails when either is unconfigured.
    pub fn alert_loop(&self) -> Result<AlertLoop> {
        let scan_url = self
            .config
            .scan_url
            .as_deref()
            .ok_or_else(|| anyhow!("scanUrl is not configured"))?;
        let webhook_url = self
            .config
            .webhook_url
            .as_deref()
            .ok_or_else(|| anyhow!("webhookUrl is not configured"))?;

        Ok(AlertLoop::new(
            Arc::new(HttpBlockScanner::new(scan_url)?),
            Arc::new(WebhookNotifier::new(webhook_url)?),
            Duration::from_secs(self.config.alert_interval_secs),
        ))
    }
}
