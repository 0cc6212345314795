//! Custodial wallet domain model

use chrono::{DateTime, Utc};
use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::codec;

/// A keypair held on behalf of a chat-platform user.
///
/// Created exactly once per user id and never deleted. The private key
/// must not leave the engine except to be consumed by transaction
/// signing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// Opaque external user identifier (unique)
    pub user_id: String,
    pub display_name: String,
    /// Canonical `0x`-prefixed 20-byte address
    pub address: String,
    /// Hex-encoded ed25519 seed
    pub private_key: String,
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    /// Generate a fresh keypair for a user and derive its address.
    ///
    /// Key material comes from the operating system CSPRNG; a broken
    /// randomness source aborts the process rather than degrading to a
    /// weak key.
    pub fn generate(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        let key = SigningKey::generate(&mut OsRng);
        let address = codec::address_to_hex(&address_from_public_key(&key.verifying_key()));
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            address,
            private_key: hex::encode(key.to_bytes()),
            created_at: Utc::now(),
        }
    }
}

/// Derive the 20-byte account address from an ed25519 public key
/// (leading bytes of the SHA-256 digest of the key).
pub fn address_from_public_key(public_key: &VerifyingKey) -> [u8; codec::ADDRESS_BYTES] {
    let digest = Sha256::digest(public_key.as_bytes());
    let mut address = [0u8; codec::ADDRESS_BYTES];
    address.copy_from_slice(&digest[..codec::ADDRESS_BYTES]);
    address
}
