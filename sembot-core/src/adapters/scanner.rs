//! HTTP block-scan collaborator client
//!
//! Consumes the scan service's output contract only; the scanner owns
//! its own block-height cursor and internals.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::ports::{BlockScanner, TransferDirection, WhaleTransfer};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the block-scan collaborator
#[derive(Debug)]
pub struct HttpBlockScanner {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ScanResponse {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    transfers: Vec<ScanTransfer>,
}

#[derive(Debug, Deserialize)]
struct ScanTransfer {
    #[serde(rename = "type")]
    kind: String,
    value: f64,
    exchange: String,
}

impl ScanTransfer {
    fn direction(&self) -> Option<TransferDirection> {
        match self.kind.as_str() {
            "deposited" => Some(TransferDirection::Deposited),
            "withdrawn" => Some(TransferDirection::Withdrawn),
            _ => None,
        }
    }
}

impl HttpBlockScanner {
    pub fn new(url: &str) -> Result<Self> {
        Url::parse(url).map_err(|e| Error::Scan(format!("invalid scan URL: {}", e)))?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Scan(e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl BlockScanner for HttpBlockScanner {
    async fn scan_new_block(&self) -> Result<Vec<WhaleTransfer>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Scan(e.to_string()))?;

        let scan: ScanResponse = response
            .json()
            .await
            .map_err(|e| Error::Scan(format!("undecodable scan response: {}", e)))?;

        if scan.error {
            return Err(Error::Scan("collaborator reported an error".to_string()));
        }

        let mut transfers = Vec::with_capacity(scan.transfers.len());
        for t in scan.transfers {
            match t.direction() {
                Some(direction) => transfers.push(WhaleTransfer {
                    direction,
                    value: Decimal::try_from(t.value).unwrap_or_default(),
                    exchange: t.exchange,
                }),
                // A mislabeled alert is worse than a missing one
                None => {
                    tracing::warn!(kind = t.kind.as_str(), "skipping transfer of unknown kind")
                }
            }
        }
        Ok(transfers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_response_shape() {
        let body = r#"{
            "error": false,
            "transfers": [
                {"type": "deposited", "value": 250000.0, "exchange": "KuCoin"},
                {"type": "withdrawn", "value": 80000.5, "exchange": "Stex"}
            ]
        }"#;
        let scan: ScanResponse = serde_json::from_str(body).unwrap();
        assert!(!scan.error);
        assert_eq!(scan.transfers.len(), 2);
        assert_eq!(scan.transfers[0].kind, "deposited");
    }

    #[test]
    fn test_direction_mapping_is_explicit() {
        let transfer = |kind: &str| ScanTransfer {
            kind: kind.to_string(),
            value: 1.0,
            exchange: "KuCoin".to_string(),
        };
        assert_eq!(
            transfer("deposited").direction(),
            Some(TransferDirection::Deposited)
        );
        assert_eq!(
            transfer("withdrawn").direction(),
            Some(TransferDirection::Withdrawn)
        );
        assert_eq!(transfer("minted").direction(), None);
        assert_eq!(transfer("").direction(), None);
    }

    #[test]
    fn test_error_only_response() {
        let scan: ScanResponse = serde_json::from_str(r#"{"error": true}"#).unwrap();
        assert!(scan.error);
        assert!(scan.transfers.is_empty());
    }
}
