//! Transfer transaction construction, serialization and signing

use ed25519_dalek::{Signer, SigningKey};
use sha2::{Digest, Sha256};

use crate::codec::ADDRESS_BYTES;
use crate::domain::result::{Error, Result};

/// Mainnet network identifier
pub const NETWORK_MAINNET: u8 = 0;

/// Transaction type tag for value transfers
pub const TX_TYPE_TRANSFER: u8 = 1;

/// A transfer transaction before signing.
///
/// Amounts and fee are minor units; the timestamp is unix milliseconds.
#[derive(Debug, Clone)]
pub struct UnsignedTransaction {
    pub network: u8,
    pub tx_type: u8,
    pub recipient: [u8; ADDRESS_BYTES],
    pub amount: u64,
    pub fee: u64,
    pub nonce: u64,
    pub timestamp: u64,
    pub data: Vec<u8>,
}

impl UnsignedTransaction {
    /// Serialize the signed-over body: network, type, recipient, amount,
    /// fee, nonce, timestamp (all integers big-endian), then
    /// length-prefixed data.
    pub fn encode_body(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(2 + ADDRESS_BYTES + 8 * 4 + 2 + self.data.len());
        body.push(self.network);
        body.push(self.tx_type);
        body.extend_from_slice(&self.recipient);
        body.extend_from_slice(&self.amount.to_be_bytes());
        body.extend_from_slice(&self.fee.to_be_bytes());
        body.extend_from_slice(&self.nonce.to_be_bytes());
        body.extend_from_slice(&self.timestamp.to_be_bytes());
        body.extend_from_slice(&(self.data.len() as u16).to_be_bytes());
        body.extend_from_slice(&self.data);
        body
    }

    /// Sign the transaction with a hex-encoded ed25519 seed.
    ///
    /// Fails with `SigningFailed` when the key material is malformed;
    /// this indicates a corrupted wallet row, never user error.
    pub fn sign(self, private_key_hex: &str) -> Result<SignedTransaction> {
        let raw = hex::decode(private_key_hex.trim_start_matches("0x"))
            .map_err(|_| Error::SigningFailed("private key is not valid hex".to_string()))?;
        let seed: [u8; 32] = raw.try_into().map_err(|v: Vec<u8>| {
            Error::SigningFailed(format!("private key has wrong length: {} bytes", v.len()))
        })?;
        let key = SigningKey::from_bytes(&seed);

        let body = self.encode_body();
        let digest = Sha256::digest(&body);
        let signature = key.sign(&digest);

        Ok(SignedTransaction {
            inner: self,
            hash: hex::encode(digest),
            signature: signature.to_bytes(),
            public_key: key.verifying_key().to_bytes(),
        })
    }
}

/// An immutable signed transfer transaction.
///
/// A given (sender, nonce) pair must reach the network at most once;
/// resubmission is rejected by the node as a duplicate.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    inner: UnsignedTransaction,
    hash: String,
    signature: [u8; 64],
    public_key: [u8; 32],
}

impl SignedTransaction {
    pub fn amount(&self) -> u64 {
        self.inner.amount
    }

    pub fn fee(&self) -> u64 {
        self.inner.fee
    }

    pub fn nonce(&self) -> u64 {
        self.inner.nonce
    }

    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Hex transaction hash (SHA-256 of the signed body)
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn public_key(&self) -> &[u8; 32] {
        &self.public_key
    }

    pub fn signature(&self) -> &[u8; 64] {
        &self.signature
    }

    /// Wire serialization: body, detached signature, then public key.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.inner.encode_body();
        bytes.extend_from_slice(&self.signature);
        bytes.extend_from_slice(&self.public_key);
        bytes
    }

    /// Hex encoding of the wire serialization, as submitted to the node.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}
