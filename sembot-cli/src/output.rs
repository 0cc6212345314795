//! Output formatting utilities

use colored::Colorize;
use serde::Serialize;

use sembot_core::Reply;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Print a reply envelope as pretty JSON.
pub fn print_json<T: Serialize>(reply: &Reply<T>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(reply)?);
    Ok(())
}

/// Render a failed reply's reason to the user.
pub fn print_failure<T>(reply: &Reply<T>) {
    match &reply.reason {
        Some(reason) => error(reason),
        None => error("Something went wrong."),
    }
}
