//! Account registry - user id to custodial wallet mapping

use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::Wallet;
use crate::ports::WalletStore;

/// Maps external user ids to wallet records, creating a keypair on
/// first access.
#[derive(Clone)]
pub struct AccountRegistry {
    store: Arc<dyn WalletStore>,
}

impl AccountRegistry {
    pub fn new(store: Arc<dyn WalletStore>) -> Self {
        Self { store }
    }

    /// Return the user's wallet, provisioning one on first access.
    ///
    /// Idempotent after the first creation. A concurrent first call for
    /// the same user resolves through the store's create-if-absent
    /// atomicity: one keypair wins, the other is discarded unused.
    pub async fn get_or_create(&self, user_id: &str, display_name: &str) -> Result<Wallet> {
        let (wallet, _) = self.provision(user_id, display_name).await?;
        Ok(wallet)
    }

    /// Like [`Self::get_or_create`], also reporting whether this call
    /// created the wallet. The flag comes from the create itself, not a
    /// separate read, so under a concurrent first access exactly one
    /// caller sees `true`: the one whose keypair won the race.
    pub async fn provision(&self, user_id: &str, display_name: &str) -> Result<(Wallet, bool)> {
        if let Some(wallet) = self.store.find(user_id).await? {
            return Ok((wallet, false));
        }

        tracing::info!(user = user_id, "provisioning new wallet keypair");
        let wallet = Wallet::generate(user_id, display_name);
        let stored = self.store.create_if_absent(&wallet).await?;
        let created = stored.address == wallet.address;
        if !created {
            tracing::debug!(user = user_id, "lost wallet creation race, using stored keypair");
        }
        Ok((stored, created))
    }

    /// Read-only lookup, no side effect.
    pub async fn find(&self, user_id: &str) -> Result<Option<Wallet>> {
        self.store.find(user_id).await
    }
}
