//! Top command - tip leaderboards

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub async fn run(received: bool, limit: usize, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let reply = if received {
        ctx.transfers.top_recipients(limit).await
    } else {
        ctx.transfers.top_senders(limit).await
    };

    if json {
        return output::print_json(&reply);
    }

    match &reply.data {
        Some(entries) if entries.is_empty() => {
            output::info("No tips recorded yet.");
        }
        Some(entries) => {
            let title = if received { "Top recipients" } else { "Top tippers" };
            println!("{}", title.bold());
            for (rank, entry) in entries.iter().enumerate() {
                println!("{:>3}. {} - {} SEM", rank + 1, entry.display_name, entry.total);
            }
        }
        None => output::print_failure(&reply),
    }
    Ok(())
}
