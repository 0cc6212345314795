//! DuckDB wallet store implementation

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use duckdb::{params, Connection};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::domain::Wallet;
use crate::ports::{TipTotal, WalletStore};

/// DuckDB-backed wallet store.
///
/// One row per external user id; the primary key plus
/// `ON CONFLICT DO NOTHING` gives the create-if-absent atomicity the
/// registry relies on.
pub struct DuckDbWalletStore {
    conn: Mutex<Connection>,
}

impl DuckDbWalletStore {
    /// Open (or create) the wallet database at the given path.
    pub fn new(db_path: &Path) -> Result<Self> {
        // Disable extension autoloading; nothing here needs extensions
        let config = duckdb::Config::default()
            .enable_autoload_extension(false)
            .map_err(store_err)?;
        let conn = Connection::open_with_flags(db_path, config).map_err(store_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Ensure the wallets table exists.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS wallets (
                user_id      TEXT PRIMARY KEY,
                display_name TEXT NOT NULL,
                address      TEXT NOT NULL,
                private_key  TEXT NOT NULL,
                sent         DOUBLE NOT NULL DEFAULT 0,
                received     DOUBLE NOT NULL DEFAULT 0,
                created_at   TEXT NOT NULL
            )",
        )
        .map_err(store_err)
    }

    fn row_to_wallet(row: &duckdb::Row) -> Wallet {
        let created_str: String = row.get(4).unwrap_or_default();
        Wallet {
            user_id: row.get(0).unwrap_or_default(),
            display_name: row.get(1).unwrap_or_default(),
            address: row.get(2).unwrap_or_default(),
            private_key: row.get(3).unwrap_or_default(),
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        }
    }

    fn select_wallet(conn: &Connection, user_id: &str) -> Result<Option<Wallet>> {
        let mut stmt = conn
            .prepare(
                "SELECT user_id, display_name, address, private_key, created_at
                 FROM wallets WHERE user_id = ?",
            )
            .map_err(store_err)?;

        match stmt.query_row(params![user_id], |row| Ok(Self::row_to_wallet(row))) {
            Ok(wallet) => Ok(Some(wallet)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(store_err(e)),
        }
    }

    fn top_by(&self, column: &str, limit: usize) -> Result<Vec<TipTotal>> {
        let conn = self.conn.lock().unwrap();
        // column is one of two compile-time constants, never user input
        let sql = format!(
            "SELECT display_name, {col} FROM wallets
             WHERE {col} > 0 ORDER BY {col} DESC LIMIT ?",
            col = column
        );
        let mut stmt = conn.prepare(&sql).map_err(store_err)?;
        let rows = stmt
            .query_map(params![limit as i64], |row| {
                let total: f64 = row.get(1).unwrap_or_default();
                Ok(TipTotal {
                    display_name: row.get(0).unwrap_or_default(),
                    total: Decimal::try_from(total).unwrap_or_default(),
                })
            })
            .map_err(store_err)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(store_err)?;
        Ok(rows)
    }
}

fn store_err(e: impl std::fmt::Display) -> Error {
    Error::Store(e.to_string())
}

#[async_trait]
impl WalletStore for DuckDbWalletStore {
    async fn find(&self, user_id: &str) -> Result<Option<Wallet>> {
        let conn = self.conn.lock().unwrap();
        Self::select_wallet(&conn, user_id)
    }

    async fn create_if_absent(&self, wallet: &Wallet) -> Result<Wallet> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO wallets (user_id, display_name, address, private_key, sent, received, created_at)
             VALUES (?, ?, ?, ?, 0, 0, ?)
             ON CONFLICT (user_id) DO NOTHING",
            params![
                wallet.user_id,
                wallet.display_name,
                wallet.address,
                wallet.private_key,
                wallet.created_at.to_rfc3339(),
            ],
        )
        .map_err(store_err)?;

        // Re-read so a lost race returns the winner's row
        Self::select_wallet(&conn, &wallet.user_id)?
            .ok_or_else(|| Error::Store(format!("wallet row vanished for user {}", wallet.user_id)))
    }

    async fn record_tip(
        &self,
        sender_id: &str,
        recipient_id: &str,
        amount: Decimal,
    ) -> Result<()> {
        let amount = amount.to_f64().unwrap_or(0.0);
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE wallets SET sent = sent + ? WHERE user_id = ?",
            params![amount, sender_id],
        )
        .map_err(store_err)?;
        conn.execute(
            "UPDATE wallets SET received = received + ? WHERE user_id = ?",
            params![amount, recipient_id],
        )
        .map_err(store_err)?;
        Ok(())
    }

    async fn top_senders(&self, limit: usize) -> Result<Vec<TipTotal>> {
        self.top_by("sent", limit)
    }

    async fn top_recipients(&self, limit: usize) -> Result<Vec<TipTotal>> {
        self.top_by("received", limit)
    }
}
