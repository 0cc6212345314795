//! Watch command - run the whale-alert loop in the foreground

use anyhow::Result;

use super::get_context;
use crate::output;

pub async fn run() -> Result<()> {
    let ctx = get_context()?;
    let alerts = ctx.alert_loop()?;

    output::info("Watching for whale transfers. Press Ctrl-C to stop.");
    alerts.run().await;
    Ok(())
}
