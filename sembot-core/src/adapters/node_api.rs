//! HTTP ledger node client
//!
//! Talks to the ledger REST API: account state reads and raw
//! transaction submission. Every call carries a bounded timeout; a
//! timed-out call surfaces as `LedgerUnreachable`, never a silent hang.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::AccountState;
use crate::ports::LedgerApi;

/// Per-request timeout for ledger calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the ledger node API
#[derive(Debug)]
pub struct HttpLedgerClient {
    client: Client,
    base_url: String,
}

/// Envelope every node endpoint answers with
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Option<T>,
}

/// Account payload; the node encodes all numbers as decimal strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountPayload {
    available: String,
    locked: String,
    nonce: String,
    pending_transaction_count: String,
}

impl HttpLedgerClient {
    /// Create a client for the given API base URL (e.g.
    /// `https://api.semux.online/v2.1.0/`).
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::LedgerUnreachable(format!("invalid API base URL: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::LedgerUnreachable(format!(
                "unsupported API URL scheme: {}",
                parsed.scheme()
            )));
        }

        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::LedgerUnreachable(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn map_request_error(error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::LedgerUnreachable(format!(
                "request timed out after {}s",
                REQUEST_TIMEOUT.as_secs()
            ))
        } else if error.is_connect() {
            Error::LedgerUnreachable("unable to connect to ledger node".to_string())
        } else {
            Error::LedgerUnreachable(error.to_string())
        }
    }

    /// Decode the node envelope, turning `success=false` into
    /// `LedgerRejected` with the node's own message.
    async fn decode<T: serde::de::DeserializeOwned + Default>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| Error::LedgerMalformedResponse(e.to_string()))?;

        if !envelope.success {
            return Err(Error::LedgerRejected(
                envelope
                    .message
                    .unwrap_or_else(|| format!("node returned HTTP {}", status)),
            ));
        }
        envelope
            .result
            .ok_or_else(|| Error::LedgerMalformedResponse("missing result field".to_string()))
    }
}

fn parse_minor(field: &str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|_| {
        Error::LedgerMalformedResponse(format!("{} is not an integer: {:?}", field, value))
    })
}

#[async_trait]
impl LedgerApi for HttpLedgerClient {
    async fn fetch_account(&self, address: &str) -> Result<AccountState> {
        let url = format!("{}account?address={}", self.base_url, address);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        let payload: AccountPayload = Self::decode(response).await?;

        Ok(AccountState {
            available: parse_minor("available", &payload.available)?,
            locked: parse_minor("locked", &payload.locked)?,
            nonce: parse_minor("nonce", &payload.nonce)?,
            pending_transaction_count: parse_minor(
                "pendingTransactionCount",
                &payload.pending_transaction_count,
            )?,
        })
    }

    async fn submit_raw(&self, raw_hex: &str) -> Result<String> {
        let url = format!(
            "{}transaction/raw?raw={}&validateNonce=true",
            self.base_url, raw_hex
        );

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(Self::map_request_error)?;

        Self::decode::<String>(response).await
    }
}
