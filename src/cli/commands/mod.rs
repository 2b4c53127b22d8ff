//! Command execution: settings resolution followed by the release run.

mod helpers;
mod release;

use crate::cli::{Args, OutputManager};
use crate::config::{FileConfig, SettingsBuilder};
use crate::error::Result;
use crate::settings::ReleaseSettings;

pub use release::execute_release;

/// Resolve settings from all layers and run the release
pub async fn execute_command(args: Args) -> Result<i32> {
    args.validate()?;
    let output = OutputManager::new(args.quiet);

    let settings = resolve_settings(&args)?;
    helpers::print_parameters(&settings, &output);

    execute_release(&args, &settings, &output).await
}

/// Merge config file, command line and environment into validated settings.
///
/// Precedence: command line, then `--config`, then `GH_TOKEN`/`GITHUB_TOKEN` for the
/// token only.
pub fn resolve_settings(args: &Args) -> Result<ReleaseSettings> {
    let base = match &args.config {
        Some(path) => SettingsBuilder::from(FileConfig::load(path)?),
        None => SettingsBuilder::default(),
    };

    base.overlay(args.settings_overrides())
        .with_env_token(|var| std::env::var(var).ok())
        .build()
}
