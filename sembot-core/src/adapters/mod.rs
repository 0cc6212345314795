//! Concrete implementations of the engine's ports

pub mod duckdb;
pub mod node_api;
pub mod scanner;
pub mod webhook;

pub use duckdb::DuckDbWalletStore;
pub use node_api::HttpLedgerClient;
pub use scanner::HttpBlockScanner;
pub use webhook::WebhookNotifier;
