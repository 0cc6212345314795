//! CLI command implementations

pub mod address;
pub mod balance;
pub mod tip;
pub mod top;
pub mod watch;
pub mod withdraw;

use std::path::PathBuf;

use anyhow::{Context, Result};
use sembot_core::SembotContext;

/// Get the sembot directory from environment or default
pub fn get_sembot_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SEMBOT_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".sembot")
    }
}

/// Get or create the engine context
pub fn get_context() -> Result<SembotContext> {
    let sembot_dir = get_sembot_dir();

    std::fs::create_dir_all(&sembot_dir)
        .with_context(|| format!("Failed to create sembot directory: {:?}", sembot_dir))?;

    SembotContext::new(&sembot_dir).context("Failed to initialize sembot context")
}
