//! Withdraw command - transfer to an external address

use anyhow::Result;

use super::get_context;
use crate::output;

pub async fn run(
    user: &str,
    address: &str,
    amount: &str,
    memo: Option<&str>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let reply = ctx.transfers.transfer(user, address, amount, memo).await;

    if json {
        return output::print_json(&reply);
    }

    match &reply.data {
        Some(receipt) => {
            output::success(&format!("Withdrew {} SEM to {}.", amount, address));
            output::info(&format!("Transaction: {}", receipt.hash));
        }
        None => output::print_failure(&reply),
    }
    Ok(())
}
