// src/pipeline/publish.rs

//! Hand-off file publishing and preview.

use crate::error::{AppError, Result};
use crate::models::{Config, HandoffDocument, SyncMode, SyncSummary};
use crate::services::{CourseResolver, TaskPublisher, TaskStore};
use crate::storage::HandoffStore;
use crate::utils::console;

/// Tasks listed per course in a preview before collapsing the rest.
const PREVIEW_PER_COURSE: usize = 5;

async fn load_document(handoff: &dyn HandoffStore, file: &str) -> Result<HandoffDocument> {
    handoff.load_handoff(file).await?.ok_or_else(|| {
        AppError::config(format!(
            "Hand-off file {file} not found. Run `sync --handoff` first."
        ))
    })
}

/// Create the tasks of a hand-off file in `store`.
pub async fn run_publish<S: TaskStore>(
    config: &Config,
    store: S,
    handoff: &dyn HandoffStore,
    file: &str,
) -> Result<SyncSummary> {
    config.validate_destination()?;
    console::header("Publishing hand-off file");

    let document = load_document(handoff, file).await?;
    console::info(&format!(
        "Loaded {} tasks from {} (synced {})",
        document.tasks_to_create.len(),
        file,
        document.sync_date.format("%Y-%m-%d %H:%M")
    ));

    let publisher = TaskPublisher::new(store, CourseResolver::new(&config.courses));
    let report = publisher.publish_planned(&document.tasks_to_create).await?;

    let mut summary = SyncSummary::new(SyncMode::Direct);
    summary.total_assignments = document.tasks_to_create.len();
    summary.created = report.created.len();
    summary.errors = report.errors;
    summary.record_skips(report.skipped);

    let summary = summary.finish();
    super::report_summary(&summary);
    Ok(summary)
}

/// Print a hand-off file grouped by course.
pub async fn run_preview(handoff: &dyn HandoffStore, file: &str) -> Result<HandoffDocument> {
    let document = load_document(handoff, file).await?;

    console::header(&format!(
        "{} tasks to create",
        document.tasks_to_create.len()
    ));
    for line in preview_lines(&document) {
        console::info(&line);
    }
    Ok(document)
}

/// Preview text: one heading per course followed by its first tasks.
pub fn preview_lines(document: &HandoffDocument) -> Vec<String> {
    let mut lines = Vec::new();
    for (course, tasks) in document.by_course() {
        lines.push(format!("{} ({} tasks)", course, tasks.len()));
        lines.extend(
            tasks
                .iter()
                .take(PREVIEW_PER_COURSE)
                .map(|name| format!("  - {name}")),
        );
        if tasks.len() > PREVIEW_PER_COURSE {
            lines.push(format!(
                "  ... and {} more",
                tasks.len() - PREVIEW_PER_COURSE
            ));
        }
    }
    lines
}
