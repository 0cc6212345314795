//! Domain models for the wallet engine

pub mod account;
pub mod result;
pub mod transaction;
pub mod wallet;

pub use account::AccountState;
pub use transaction::{SignedTransaction, UnsignedTransaction, NETWORK_MAINNET, TX_TYPE_TRANSFER};
pub use wallet::Wallet;
