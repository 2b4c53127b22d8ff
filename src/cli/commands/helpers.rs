//! Shared printing helpers for command output

use crate::cli::OutputManager;
use crate::orchestrator::RunReport;
use crate::release::UploadOutcome;
use crate::settings::ReleaseSettings;

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Echo the effective parameters; the token is never printed
pub(super) fn print_parameters(settings: &ReleaseSettings, output: &OutputManager) {
    output.section("Parameters");
    output.indent(&format!("Repository: {}", settings.repo));
    output.indent("Token: ***");
    output.indent(&format!(
        "Version file: {}",
        settings.artifact_path.display()
    ));
    output.indent(&format!("Pre-release: {}", yes_no(settings.is_pre_release)));
    output.indent(&format!("Draft: {}", yes_no(settings.is_draft)));
    output.indent(&format!("Update only: {}", yes_no(settings.is_update_only)));
    output.indent(&format!(
        "Create CHANGELOG.md: {}",
        yes_no(settings.create_changelog_file)
    ));
    if let Some(label) = &settings.issue_filter_label {
        output.indent(&format!("Filter label: {}", label));
    }
    for mapping in &settings.label_headers {
        output.indent(&format!("Label: {} -> {}", mapping.label, mapping.header));
    }
    for attachment in &settings.attachment_paths {
        output.indent(&format!("Attachment: {}", attachment.display()));
    }
    output.indent(&format!(
        "Delete attachments: {}",
        yes_no(settings.delete_attachments_after_upload)
    ));
}

/// Summarize a finished run
pub(super) fn print_report(report: &RunReport, output: &OutputManager) {
    output.section("Release");
    let kind = match (report.release.draft, report.release.prerelease) {
        (true, _) => " (draft)",
        (false, true) => " (pre-release)",
        (false, false) => "",
    };
    output.success(&format!(
        "Release {}{}: {}",
        report.release.name, kind, report.release.html_url
    ));

    match &report.uploads {
        UploadOutcome::Skipped => output.info("No attachments configured"),
        UploadOutcome::Completed {
            uploaded,
            local_files_deleted,
        } => {
            output.success(&format!("Uploaded {} attachment(s)", uploaded.len()));
            for name in uploaded {
                output.indent(name);
            }
            if *local_files_deleted {
                output.info("Local attachment files deleted");
            }
        }
        UploadOutcome::Failed {
            uploaded,
            failed_path,
            error,
        } => {
            output.warn(&format!(
                "Attachment upload failed at {}: {}",
                failed_path.display(),
                error
            ));
            for name in uploaded {
                output.indent(&format!("uploaded before failure: {}", name));
            }
            output.warn("Local attachment files were kept");
        }
    }

    output.section("Changelog");
    if report.changelog.is_empty() {
        output.info("No closed issues for this milestone");
    } else {
        output.println(&report.changelog);
    }

    if let Some(document) = &report.changelog_document {
        output.section("CHANGELOG.md");
        output.println(document);
    }
}
