//! Command line interface for release synchronization.

mod args;
pub mod commands;
mod output;

pub use args::Args;
pub use commands::{execute_command, resolve_settings};
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
