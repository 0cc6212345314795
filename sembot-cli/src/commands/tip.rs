//! Tip command - user-to-user transfer with leaderboard accounting

use anyhow::Result;

use super::get_context;
use crate::output;

pub async fn run(
    sender: &str,
    recipient: &str,
    amount: &str,
    memo: Option<&str>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;

    // The recipient may never have interacted before; provision their
    // wallet so the tip has somewhere to land.
    let recipient_wallet = ctx.transfers.get_or_create_address(recipient, recipient).await;
    let recipient_address = match &recipient_wallet.data {
        Some(info) => info.address.clone(),
        None => {
            if json {
                return output::print_json(&recipient_wallet);
            }
            output::print_failure(&recipient_wallet);
            return Ok(());
        }
    };

    let reply = ctx
        .transfers
        .transfer(sender, &recipient_address, amount, memo)
        .await;

    if !reply.error {
        ctx.transfers.record_tip(sender, recipient, amount).await;
    }

    if json {
        return output::print_json(&reply);
    }

    match &reply.data {
        Some(receipt) => {
            output::success(&format!("Sent {} SEM to {}.", amount, recipient));
            output::info(&format!("Transaction: {}", receipt.hash));
        }
        None => output::print_failure(&reply),
    }
    Ok(())
}
