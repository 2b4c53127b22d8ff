//! Release command implementation.

use super::helpers::print_report;
use crate::cli::{Args, OutputManager};
use crate::error::Result;
use crate::fs::LocalFileSystem;
use crate::github::GitHubClient;
use crate::orchestrator::ReleaseOrchestrator;
use crate::settings::ReleaseSettings;

/// Run the release against GitHub with the local file system.
///
/// A partially failed attachment upload is reported but does not fail the run.
pub async fn execute_release(
    args: &Args,
    settings: &ReleaseSettings,
    output: &OutputManager,
) -> Result<i32> {
    let client = GitHubClient::with_base_urls(
        settings.repo.clone(),
        &settings.auth_token,
        &args.api_url,
        &args.upload_url,
    )?;
    let fs = LocalFileSystem;

    let report = ReleaseOrchestrator::new(&client, &fs, settings)
        .run()
        .await?;

    print_report(&report, output);
    output.success(&format!(
        "Released {} to {}",
        report.version.full_identifier(),
        client.repo()
    ));

    Ok(0)
}
