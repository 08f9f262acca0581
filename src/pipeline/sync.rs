// src/pipeline/sync.rs

//! Feed to destination sync pipeline.

use chrono::NaiveDate;
use reqwest::Client;

use crate::error::Result;
use crate::models::{Config, HandoffDocument, SyncMode, SyncSummary};
use crate::services::{
    CourseResolver, EventExtractor, Extraction, FeedFetcher, TaskPublisher, TaskStore, plan,
};
use crate::storage::HandoffStore;
use crate::utils::console;

const STEPS: usize = 3;

/// Run one sync.
///
/// With `sync.direct_publish` the assignments are created in `store`;
/// otherwise the planned tasks are written to the hand-off file through
/// `handoff` and `store` is left untouched.
pub async fn run_sync<S: TaskStore>(
    config: &Config,
    client: &Client,
    store: S,
    handoff: &dyn HandoffStore,
    today: NaiveDate,
) -> Result<SyncSummary> {
    config.validate()?;

    let mode = if config.sync.direct_publish {
        SyncMode::Direct
    } else {
        SyncMode::Handoff
    };
    console::header("Canvas to Notion sync");

    console::step(1, STEPS, "Fetching calendar feed");
    let fetcher = FeedFetcher::new(client.clone(), config.feed.url.as_str());
    let document = fetcher.fetch().await?;

    console::step(2, STEPS, "Extracting assignments");
    let extraction = EventExtractor::new(config)?.extract(&document, today)?;
    console::sub_item(&format!(
        "{} assignments, {} ready, {} untitled events ignored",
        extraction.total(),
        extraction.assignments.len(),
        extraction.ignored_events
    ));

    let mut summary = SyncSummary::new(mode);
    summary.total_assignments = extraction.total();
    summary.ignored_events = extraction.ignored_events;

    let Extraction {
        assignments,
        skipped,
        ..
    } = extraction;
    summary.record_skips(skipped);

    let resolver = CourseResolver::new(&config.courses);
    match mode {
        SyncMode::Direct => {
            console::step(3, STEPS, "Publishing tasks");
            let publisher = TaskPublisher::new(store, resolver);
            let report = publisher.publish(&assignments).await?;

            summary.created = report.created.len();
            summary.errors = report.errors;
            summary.record_skips(report.skipped);
        }
        SyncMode::Handoff => {
            console::step(3, STEPS, "Writing hand-off file");
            let (tasks, skipped) = plan(&resolver, &assignments);
            let document = HandoffDocument::new(tasks, skipped.clone());
            handoff
                .save_handoff(&config.sync.handoff_file, &document)
                .await?;

            summary.planned = document.tasks_to_create.len();
            summary.record_skips(skipped);
        }
    }

    let summary = summary.finish();
    report_summary(&summary);
    Ok(summary)
}

/// Print the run summary block.
pub fn report_summary(summary: &SyncSummary) {
    let mut items = vec![
        ("Total assignments", summary.total_assignments.to_string()),
        ("Created", summary.created.to_string()),
    ];
    if summary.mode == SyncMode::Handoff {
        items.push(("Planned", summary.planned.to_string()));
    }
    items.push(("Skipped", summary.skipped.to_string()));
    for (reason, count) in summary.skip_breakdown.iter().filter(|(_, n)| **n > 0) {
        items.push(("  skipped", format!("{reason}: {count}")));
    }
    if summary.ignored_events > 0 {
        items.push(("Ignored events", summary.ignored_events.to_string()));
    }
    items.push(("Errors", summary.errors.len().to_string()));
    console::summary("Sync", &items);

    for name in &summary.errors {
        console::warn(&format!("Failed to create: {name}"));
    }
    if summary.errors.is_empty() {
        console::success("Sync complete");
    }
}
