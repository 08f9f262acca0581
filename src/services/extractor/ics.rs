// src/services/extractor/ics.rs

//! ICS document walking using the icalendar crate's parser.

use chrono::NaiveDate;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

use crate::error::{AppError, Result};

/// The VEVENT fields the pipeline reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub location: String,
    pub uid: String,
    /// DTSTART truncated to its date
    pub start: Option<NaiveDate>,
}

/// Parse every VEVENT in an ICS document, including nested ones.
pub fn parse_events(document: &str) -> Result<Vec<CalendarEvent>> {
    let unfolded = unfold(document);
    let calendar = read_calendar(&unfolded).map_err(AppError::ics)?;

    let mut events = Vec::new();
    for component in &calendar.components {
        collect_events(component, &mut events);
    }
    Ok(events)
}

fn collect_events(component: &Component<'_>, events: &mut Vec<CalendarEvent>) {
    if component.name == "VEVENT" {
        events.push(to_event(component));
    }
    for child in &component.components {
        collect_events(child, events);
    }
}

fn to_event(vevent: &Component<'_>) -> CalendarEvent {
    let text = |name: &str| {
        vevent
            .find_prop(name)
            .map(|p| unescape_text(p.val.as_ref()))
            .unwrap_or_default()
    };

    let start = vevent.find_prop("DTSTART").and_then(|prop| {
        let parsed = DatePerhapsTime::try_from(prop).ok().map(to_due_date);
        if parsed.is_none() {
            log::debug!("Unparseable DTSTART {:?}", prop.val.as_ref());
        }
        parsed
    });

    CalendarEvent {
        summary: text("SUMMARY"),
        description: text("DESCRIPTION"),
        location: text("LOCATION"),
        uid: text("UID"),
        start,
    }
}

/// Keep the calendar date as written, dropping any time of day.
fn to_due_date(dpt: DatePerhapsTime) -> NaiveDate {
    match dpt {
        DatePerhapsTime::Date(date) => date,
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => dt.date_naive(),
            CalendarDateTime::Floating(naive) => naive.date(),
            CalendarDateTime::WithTimezone { date_time, .. } => date_time.date(),
        },
    }
}

/// Decode RFC 5545 TEXT escapes.
fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(escaped) => out.push(escaped),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Instructure//Canvas//EN\r\n\
BEGIN:VEVENT\r\n\
UID:event-assignment-1\r\n\
DTSTAMP:20261001T120000Z\r\n\
DTSTART:20261020T235900Z\r\n\
SUMMARY:Quiz 2 [cs_124_120258_248828]\r\n\
DESCRIPTION:Due soon\\, see https://canvas.illinois.edu/courses/1/assignm\r\n ents/2\r\n\
LOCATION:cs_124_120258_248828\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:event-assignment-2\r\n\
DTSTAMP:20261001T120000Z\r\n\
DTSTART;VALUE=DATE:20261101\r\n\
SUMMARY:[HIST 281] Essay Draft\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:event-assignment-3\r\n\
DTSTAMP:20261001T120000Z\r\n\
SUMMARY:Reading\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn test_parse_events_fields() {
        let events = parse_events(FEED).unwrap();
        assert_eq!(events.len(), 3);

        let quiz = &events[0];
        assert_eq!(quiz.summary, "Quiz 2 [cs_124_120258_248828]");
        assert_eq!(quiz.uid, "event-assignment-1");
        assert_eq!(quiz.location, "cs_124_120258_248828");
        assert_eq!(quiz.start, NaiveDate::from_ymd_opt(2026, 10, 20));
        assert_eq!(
            quiz.description,
            "Due soon, see https://canvas.illinois.edu/courses/1/assignments/2"
        );

        assert_eq!(events[1].start, NaiveDate::from_ymd_opt(2026, 11, 1));
        assert_eq!(events[2].start, None);
        assert!(events[2].description.is_empty());
    }

    #[test]
    fn test_floating_and_zoned_times_keep_written_date() {
        let feed = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:a\r\n\
DTSTART:20261020T235900\r\n\
SUMMARY:Floating\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:b\r\n\
DTSTART;TZID=America/Chicago:20261021T235900\r\n\
SUMMARY:Zoned\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let events = parse_events(feed).unwrap();
        assert_eq!(events[0].start, NaiveDate::from_ymd_opt(2026, 10, 20));
        assert_eq!(events[1].start, NaiveDate::from_ymd_opt(2026, 10, 21));
    }

    #[test]
    fn test_html_document_is_ics_error() {
        let page = "<html><head><title>Log In</title></head><body>Session expired</body></html>";
        assert!(matches!(parse_events(page), Err(AppError::Ics(_))));
    }

    #[test]
    fn test_unescape_text() {
        assert_eq!(unescape_text(r"a\, b\; c\\d\ne"), "a, b; c\\d\ne");
        assert_eq!(unescape_text("plain"), "plain");
    }
}
