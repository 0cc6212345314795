//! Balance command - fetch a user's ledger balance

use anyhow::Result;

use super::get_context;
use crate::output;

pub async fn run(user: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let reply = ctx.transfers.get_balance(user).await;

    if json {
        return output::print_json(&reply);
    }

    match &reply.data {
        Some(info) if info.empty => {
            output::info("Your wallet is empty. Deposit some SEM to start tipping.");
        }
        Some(info) => {
            println!("Available: {} SEM", info.available);
            println!("Locked:    {} SEM", info.locked);
            println!("Total:     {} SEM", info.total);
        }
        None => output::print_failure(&reply),
    }
    Ok(())
}
