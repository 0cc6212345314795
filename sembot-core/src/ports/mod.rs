//! Trait definitions for external collaborators

pub mod alerts;
pub mod ledger;
pub mod store;

pub use alerts::{BlockScanner, NotificationSink, TransferDirection, WhaleTransfer};
pub use ledger::LedgerApi;
pub use store::{TipTotal, WalletStore};
