//! iCalendar export
//!
//! Builds minimal RFC 5545 documents holding a single `VEVENT`, used for the
//! onboarding kickoff reminder and for scheduled service projects.
//!
//! Times are floating local times (no `Z`, no `TZID`), so calendar apps place
//! the event at the same wall-clock time the user entered.

use chrono::{Duration, Local, NaiveDateTime};
use uuid::Uuid;

use crate::models::ServiceProject;

const PRODID: &str = "-//Present Year Practice//EN";
const UID_DOMAIN: &str = "presentyearpractice.com";
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Minutes blocked for the onboarding kickoff event
pub const KICKOFF_MINUTES: i64 = 60;

/// Minutes blocked for a service project
pub const SERVICE_PROJECT_MINUTES: i64 = 120;

/// A single calendar event
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
    /// When the event was generated
    pub stamp: NaiveDateTime,
}

impl CalendarEvent {
    /// Create an event with a fresh UID, stamped now
    pub fn new(
        summary: impl Into<String>,
        description: impl Into<String>,
        start: NaiveDateTime,
        duration_minutes: i64,
    ) -> Self {
        Self {
            uid: format!("{}@{}", Uuid::new_v4(), UID_DOMAIN),
            summary: summary.into(),
            description: description.into(),
            start,
            duration_minutes,
            stamp: Local::now().naive_local(),
        }
    }

    /// Reminder for starting the 12-month program
    pub fn kickoff(start: NaiveDateTime) -> Self {
        Self::new(
            "Begin Present Year Practice",
            "Start your 12-month journey of presence and purpose",
            start,
            KICKOFF_MINUTES,
        )
    }

    /// Event for a scheduled service project
    pub fn service_project(project: &ServiceProject) -> Self {
        Self::new(
            format!("Service Project: {}", project.cause),
            "Service project for Present Year Practice",
            project.date,
            SERVICE_PROJECT_MINUTES,
        )
    }

    /// When the event ends
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::minutes(self.duration_minutes)
    }

    /// Render the event as an iCalendar document
    pub fn to_ics(&self) -> String {
        let lines = [
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{}", PRODID),
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}", self.uid),
            format!("DTSTAMP:{}", self.stamp.format(TIMESTAMP_FORMAT)),
            format!("DTSTART:{}", self.start.format(TIMESTAMP_FORMAT)),
            format!("DTEND:{}", self.end().format(TIMESTAMP_FORMAT)),
            format!("SUMMARY:{}", escape_text(&self.summary)),
            format!("DESCRIPTION:{}", escape_text(&self.description)),
            "END:VEVENT".to_string(),
            "END:VCALENDAR".to_string(),
        ];

        let mut ics = lines.join("\r\n");
        ics.push_str("\r\n");
        ics
    }
}

/// Escape a TEXT value (RFC 5545 section 3.3.11)
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_one_hour_event() {
        let event = CalendarEvent::new("Circle", "Monthly circle", at(2024, 1, 1, 9, 0), 60);
        let ics = event.to_ics();

        assert!(ics.contains("DTSTART:20240101T090000\r\n"));
        assert!(ics.contains("DTEND:20240101T100000\r\n"));
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
    }

    #[test]
    fn test_document_structure() {
        let event = CalendarEvent::kickoff(at(2024, 6, 1, 8, 30));
        let ics = event.to_ics();
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert_eq!(lines[0], "BEGIN:VCALENDAR");
        assert_eq!(lines[1], "VERSION:2.0");
        assert_eq!(lines[2], "PRODID:-//Present Year Practice//EN");
        assert_eq!(lines[3], "BEGIN:VEVENT");
        assert!(lines[4].starts_with("UID:"));
        assert!(lines[4].ends_with("@presentyearpractice.com"));
        assert!(lines[5].starts_with("DTSTAMP:"));
        assert_eq!(lines[8], "SUMMARY:Begin Present Year Practice");
        assert_eq!(lines[10], "END:VEVENT");
        assert_eq!(lines[11], "END:VCALENDAR");
        assert!(ics.ends_with("\r\n"));
    }

    #[test]
    fn test_end_crosses_midnight() {
        let event = CalendarEvent::new("Vigil", "", at(2024, 12, 31, 23, 30), 90);
        assert_eq!(event.end(), at(2025, 1, 1, 1, 0));
        assert!(event.to_ics().contains("DTEND:20250101T010000"));
    }

    #[test]
    fn test_uids_are_unique() {
        let start = at(2024, 1, 1, 9, 0);
        let a = CalendarEvent::kickoff(start);
        let b = CalendarEvent::kickoff(start);
        assert_ne!(a.uid, b.uid);
    }

    #[test]
    fn test_service_project_event() {
        let project = ServiceProject::new("Food bank", at(2024, 2, 3, 10, 30), vec!["Sort cans"]);
        let event = CalendarEvent::service_project(&project);

        assert_eq!(event.summary, "Service Project: Food bank");
        assert_eq!(event.end(), at(2024, 2, 3, 12, 30));
    }

    #[test]
    fn test_text_values_are_escaped() {
        assert_eq!(escape_text("a, b; c\\d\nnext"), "a\\, b\\; c\\\\d\\nnext");

        let event = CalendarEvent::new("Tea, talk", "line one\nline two", at(2024, 1, 1, 9, 0), 30);
        let ics = event.to_ics();
        assert!(ics.contains("SUMMARY:Tea\\, talk"));
        assert!(ics.contains("DESCRIPTION:line one\\nline two"));
    }
}
