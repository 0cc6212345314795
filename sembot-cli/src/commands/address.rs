//! Address command - show or provision a user's deposit address

use anyhow::Result;

use super::get_context;
use crate::output;

pub async fn run(user: &str, name: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let display_name = name.unwrap_or(user);

    let reply = ctx.transfers.get_or_create_address(user, display_name).await;

    if json {
        return output::print_json(&reply);
    }

    match &reply.data {
        Some(info) if info.created => {
            output::success(&format!("Created a wallet for {}.", display_name));
            output::info(&info.address);
        }
        Some(info) => output::info(&info.address),
        None => output::print_failure(&reply),
    }
    Ok(())
}
