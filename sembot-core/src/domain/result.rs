//! Result and error types for the wallet engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine error taxonomy.
///
/// Validation variants (`InvalidAmount`, `InvalidRecipient`,
/// `InsufficientBalance`, `NoWallet`, `MalformedAddress`) are expected
/// user-input failures. Infrastructure variants are logged by the service
/// layer and rendered to users as a generic "unavailable" reason.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("recipient account not found on the ledger")]
    InvalidRecipient,

    #[error("insufficient balance: {available} SEM available")]
    InsufficientBalance { available: String },

    #[error("no wallet provisioned for user {0}")]
    NoWallet(String),

    #[error("malformed address: {0}")]
    MalformedAddress(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("ledger unreachable: {0}")]
    LedgerUnreachable(String),

    #[error("malformed ledger response: {0}")]
    LedgerMalformedResponse(String),

    #[error("ledger rejected transaction: {0}")]
    LedgerRejected(String),

    #[error("wallet store error: {0}")]
    Store(String),

    #[error("block scan failed: {0}")]
    Scan(String),

    #[error("notification delivery failed: {0}")]
    Notify(String),
}

impl Error {
    /// True for errors caused by user input rather than infrastructure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidAmount(_)
                | Error::InvalidRecipient
                | Error::InsufficientBalance { .. }
                | Error::NoWallet(_)
                | Error::MalformedAddress(_)
        )
    }

    /// True when a submission was rejected because the node already
    /// processed a transaction with this (sender, nonce) or hash.
    /// A retried broadcast after a lost response lands here.
    pub fn is_duplicate_rejection(&self) -> bool {
        match self {
            Error::LedgerRejected(reason) => {
                let reason = reason.to_lowercase();
                reason.contains("duplicate") || reason.contains("already")
            }
            _ => false,
        }
    }

    /// Human-readable reason rendered directly to the end user.
    ///
    /// Infrastructure failures deliberately collapse to a generic message;
    /// internal detail stays in the logs.
    pub fn user_reason(&self) -> String {
        match self {
            Error::InvalidAmount(_) => "Amount is not correct.".to_string(),
            Error::InvalidRecipient => "Wrong recipient, try another one.".to_string(),
            Error::InsufficientBalance { available } => {
                format!("Insufficient balance, you have {} SEM", available)
            }
            Error::NoWallet(_) => {
                "You don't have an account yet, request a deposit address first.".to_string()
            }
            Error::MalformedAddress(_) => "That address is not valid.".to_string(),
            Error::SigningFailed(_) => {
                "Error while trying to create the transaction.".to_string()
            }
            Error::LedgerRejected(_) if self.is_duplicate_rejection() => {
                "This transfer was already processed by the network.".to_string()
            }
            Error::LedgerRejected(_) => {
                "The network rejected the transaction, try again.".to_string()
            }
            Error::LedgerUnreachable(_)
            | Error::LedgerMalformedResponse(_)
            | Error::Store(_)
            | Error::Scan(_)
            | Error::Notify(_) => "Service is unavailable, try again later.".to_string(),
        }
    }
}

/// Engine result type
pub type Result<T> = std::result::Result<T, Error>;

/// Reply envelope returned across the command boundary.
///
/// Command handlers render `reason` directly to the user; nothing ever
/// raises across this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply<T> {
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Reply<T> {
    /// Create a successful reply
    pub fn ok(data: T) -> Self {
        Self {
            error: false,
            reason: None,
            data: Some(data),
        }
    }

    /// Create a failed reply
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            error: true,
            reason: Some(reason.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_ok() {
        let reply: Reply<u32> = Reply::ok(7);
        assert!(!reply.error);
        assert_eq!(reply.data, Some(7));
        assert!(reply.reason.is_none());
    }

    #[test]
    fn test_reply_fail() {
        let reply: Reply<u32> = Reply::fail("nope");
        assert!(reply.error);
        assert!(reply.data.is_none());
        assert_eq!(reply.reason, Some("nope".to_string()));
    }

    #[test]
    fn test_infrastructure_reason_is_generic() {
        let err = Error::LedgerUnreachable("connection refused to 10.0.0.3".to_string());
        let reason = err.user_reason();
        assert!(!reason.contains("10.0.0.3"));
        assert!(reason.contains("unavailable"));
    }

    #[test]
    fn test_duplicate_rejection_detection() {
        let dup = Error::LedgerRejected("transaction already processed".to_string());
        assert!(dup.is_duplicate_rejection());
        assert!(dup.user_reason().contains("already processed"));

        let other = Error::LedgerRejected("invalid nonce".to_string());
        assert!(!other.is_duplicate_rejection());
    }
}
