//! `canvas-sync sync --json` keeps stdout machine-readable.

#![cfg(feature = "cli")]

use std::process::Command;

use chrono::{Days, Local};
use serde_json::Value;

#[test]
fn sync_json_prints_only_the_summary() {
    let due = Local::now()
        .date_naive()
        .checked_add_days(Days::new(5))
        .unwrap();
    let feed = [
        "BEGIN:VCALENDAR",
        "VERSION:2.0",
        "PRODID:instructure-ical",
        "BEGIN:VEVENT",
        "UID:event-assignment-201",
        &format!("DTSTART;VALUE=DATE:{}", due.format("%Y%m%d")),
        "SUMMARY:MP4 [cs_124_120258_248828]",
        "END:VEVENT",
        "END:VCALENDAR",
        "",
    ]
    .join("\r\n");

    let mut server = mockito::Server::new();
    server
        .mock("GET", "/feed.ics")
        .with_status(200)
        .with_body(feed)
        .create();

    let storage = tempfile::TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_canvas-sync"))
        .arg("--storage-dir")
        .arg(storage.path())
        .args(["sync", "--handoff", "--json"])
        .env("CANVAS_ICS_URL", format!("{}/feed.ics", server.url()))
        .env(
            "COURSE_MAPPING",
            r#"{"CS 124": "25a399d357138052ab2be817336f99b7"}"#,
        )
        .env_remove("NOTION_API_TOKEN")
        .env_remove("TASKS_DATABASE_ID")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    let summary: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["mode"], "handoff");
    assert_eq!(summary["total_assignments"], 1);
    assert_eq!(summary["planned"], 1);
    assert!(storage.path().join("canvas_sync_data.json").exists());
}
