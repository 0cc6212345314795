//! Business logic orchestration

pub mod alerts;
pub mod builder;
pub mod registry;
pub mod transfer;

pub use alerts::AlertLoop;
pub use builder::TransactionBuilder;
pub use registry::AccountRegistry;
pub use transfer::{AddressInfo, BalanceInfo, TipEntry, TransferReceipt, TransferService};
