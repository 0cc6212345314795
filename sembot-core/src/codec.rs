//! Address and amount codec
//!
//! Converts between textual address forms and raw bytes, and between
//! display amounts (SEM) and the ledger's integer minor-unit
//! representation (1 SEM = 10^9 minor units).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::result::{Error, Result};

/// Minor units per display unit (1 SEM = 10^9 nano)
pub const MINOR_UNITS_PER_SEM: u64 = 1_000_000_000;

/// Raw address length in bytes
pub const ADDRESS_BYTES: usize = 20;

/// Memo bytes used when no comment is supplied; the network reads this
/// as a plain tip.
pub const DEFAULT_MEMO: &[u8] = b"tip";

/// Decode a hex address, with or without the `0x` prefix, into raw bytes.
pub fn address_to_bytes(address: &str) -> Result<[u8; ADDRESS_BYTES]> {
    let stripped = address.trim().trim_start_matches("0x");
    let bytes = hex::decode(stripped)
        .map_err(|_| Error::MalformedAddress(address.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| Error::MalformedAddress(address.to_string()))
}

/// Canonical `0x`-prefixed lowercase hex rendering of a raw address.
pub fn address_to_hex(address: &[u8; ADDRESS_BYTES]) -> String {
    format!("0x{}", hex::encode(address))
}

/// Convert minor units to a display amount, rounded to 10 decimal places.
pub fn to_display_amount(minor: u64) -> Decimal {
    (Decimal::from(minor) / Decimal::from(MINOR_UNITS_PER_SEM)).round_dp(10)
}

/// Parse a display amount string into minor units.
///
/// A comma decimal separator is normalized to a dot before parsing.
/// Fails with `InvalidAmount` on unparsable or negative input.
pub fn to_minor_units(display: &str) -> Result<u64> {
    let normalized = display.trim().replace(',', ".");
    let amount: Decimal = normalized
        .parse()
        .map_err(|_| Error::InvalidAmount(display.to_string()))?;
    if amount.is_sign_negative() {
        return Err(Error::InvalidAmount(display.to_string()));
    }
    amount
        .checked_mul(Decimal::from(MINOR_UNITS_PER_SEM))
        .map(|m| m.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|m| m.to_u64())
        .ok_or_else(|| Error::InvalidAmount(display.to_string()))
}

/// Fixed nine-decimal rendering used in user-facing balance text,
/// e.g. `1.000000000`.
pub fn format_sem(minor: u64) -> String {
    let amount = Decimal::from(minor) / Decimal::from(MINOR_UNITS_PER_SEM);
    format!("{:.9}", amount)
}

/// Encode an optional memo as transaction data bytes.
pub fn encode_memo(memo: Option<&str>) -> Vec<u8> {
    match memo {
        Some(text) if !text.is_empty() => text.as_bytes().to_vec(),
        _ => DEFAULT_MEMO.to_vec(),
    }
}
