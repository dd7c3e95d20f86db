//! Data models for Present Year Practice
//!
//! Defines the persisted `AppState` document and everything embedded in it:
//! module progress, journal entries, service projects, legacy items, streaks
//! and preferences.
//!
//! Field names serialize in camelCase so the document layout matches the
//! `pypState` JSON written by earlier versions of the app.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Number of monthly modules in the program
pub const PROGRAM_MONTHS: usize = 12;

/// Number of weekly units in every module
pub const WEEKS_PER_MONTH: usize = 4;

/// Reminder time used until the user picks one
pub const DEFAULT_REMINDER_TIME: &str = "09:00";

/// Tags offered when writing a journal entry
///
/// Not enforced on stored entries.
pub const JOURNAL_TAGS: [&str; 8] = [
    "gratitude",
    "reflection",
    "fear",
    "joy",
    "growth",
    "challenge",
    "insight",
    "intention",
];

/// Generate a fresh identifier for a stored entity
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Error returned when parsing one of the string enums fails
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// How the user chose to work through the program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticePath {
    Individual,
    Group,
    Hybrid,
}

impl PracticePath {
    pub fn as_str(&self) -> &'static str {
        match self {
            PracticePath::Individual => "individual",
            PracticePath::Group => "group",
            PracticePath::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for PracticePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PracticePath {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "individual" => Ok(PracticePath::Individual),
            "group" => Ok(PracticePath::Group),
            "hybrid" => Ok(PracticePath::Hybrid),
            _ => Err(ParseEnumError {
                kind: "path",
                value: s.to_string(),
                expected: "individual, group, hybrid",
            }),
        }
    }
}

/// Progress through one monthly module
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleProgress {
    /// Program month (1-12), fixed by position
    pub month: u8,
    /// One flag per week
    pub weeks_completed: Vec<bool>,
    /// Kept for layout compatibility; nothing reads it
    pub checklist_items: Vec<bool>,
    /// Per-module notes; nothing reads these yet
    pub journal_entries: Vec<String>,
    /// Free-text reflection for the month
    pub reflection: String,
}

impl ModuleProgress {
    /// Create empty progress for the given month
    pub fn new(month: u8) -> Self {
        Self {
            month,
            weeks_completed: vec![false; WEEKS_PER_MONTH],
            checklist_items: Vec::new(),
            journal_entries: Vec::new(),
            reflection: String::new(),
        }
    }

    /// Number of weeks marked complete
    pub fn weeks_done(&self) -> usize {
        self.weeks_completed.iter().filter(|done| **done).count()
    }

    /// Whether every week of the month is complete
    pub fn is_complete(&self) -> bool {
        self.weeks_done() == WEEKS_PER_MONTH
    }
}

/// A journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Unique identifier
    pub id: String,
    /// When the entry was written
    pub date: DateTime<Utc>,
    /// Entry body
    pub content: String,
    /// Tags, normally drawn from `JOURNAL_TAGS`
    #[serde(default)]
    pub tags: Vec<String>,
    /// Mood on a 1-10 scale
    pub mood: u8,
    /// Excluded from shared views
    #[serde(default)]
    pub is_private: bool,
}

impl JournalEntry {
    pub const MIN_MOOD: u8 = 1;
    pub const MAX_MOOD: u8 = 10;
    pub const DEFAULT_MOOD: u8 = 5;

    /// Create a new entry written now with a neutral mood
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            date: Utc::now(),
            content: content.into(),
            tags: Vec::new(),
            mood: Self::DEFAULT_MOOD,
            is_private: false,
        }
    }

    /// Set the mood, clamped into 1-10
    pub fn set_mood(&mut self, mood: u8) {
        self.mood = mood.clamp(Self::MIN_MOOD, Self::MAX_MOOD);
    }

    /// Add a tag
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Mark the entry private or shared
    pub fn set_private(&mut self, is_private: bool) {
        self.is_private = is_private;
    }

    /// Whether the entry matches a journal filter
    ///
    /// A filter matches when it equals one of the tags or appears
    /// (case-insensitively) in the content. An empty filter matches everything.
    pub fn matches(&self, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        self.tags.iter().any(|t| t == filter)
            || self.content.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// One checklist item on a service project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTask {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl ServiceTask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

/// A volunteering activity with a task checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProject {
    /// Unique identifier
    pub id: String,
    /// The cause being served
    pub cause: String,
    /// Scheduled local date and time
    #[serde(with = "local_datetime")]
    pub date: NaiveDateTime,
    /// Checklist, in the order entered
    #[serde(default)]
    pub tasks: Vec<ServiceTask>,
    /// Reflection written after the project (empty until then)
    #[serde(default)]
    pub reflection: String,
}

impl ServiceProject {
    /// Create a project; blank task lines are dropped
    pub fn new<I, S>(cause: impl Into<String>, date: NaiveDateTime, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tasks = tasks
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.trim().is_empty())
            .map(ServiceTask::new)
            .collect();

        Self {
            id: new_id(),
            cause: cause.into(),
            date,
            tasks,
            reflection: String::new(),
        }
    }

    /// Number of tasks marked done
    pub fn tasks_done(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    pub fn has_reflection(&self) -> bool {
        !self.reflection.trim().is_empty()
    }
}

/// Kind of legacy vault entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyKind {
    Letter,
    Memory,
}

impl LegacyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegacyKind::Letter => "letter",
            LegacyKind::Memory => "memory",
        }
    }
}

impl fmt::Display for LegacyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegacyKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "letter" => Ok(LegacyKind::Letter),
            "memory" => Ok(LegacyKind::Memory),
            _ => Err(ParseEnumError {
                kind: "legacy item type",
                value: s.to_string(),
                expected: "letter, memory",
            }),
        }
    }
}

/// A letter or memory kept in the legacy vault
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyItem {
    /// Unique identifier
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LegacyKind,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl LegacyItem {
    pub fn new(kind: LegacyKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            kind,
            title: title.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Practice counters; only ever incremented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Streaks {
    pub gratitude: u32,
    pub presence: u32,
}

/// Reminder preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Time of day as `HH:MM`
    pub reminder_time: String,
    pub notifications_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            reminder_time: DEFAULT_REMINDER_TIME.to_string(),
            notifications_enabled: true,
        }
    }
}

/// The single persisted application document
///
/// Missing top-level keys fall back to their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    /// Gates every practice view until onboarding finishes
    pub onboarding_complete: bool,
    /// `None` until chosen during onboarding
    pub path: Option<PracticePath>,
    pub goals: Vec<String>,
    /// Always 12 entries; index `i` is month `i + 1`
    pub module_progress: Vec<ModuleProgress>,
    pub journal_entries: Vec<JournalEntry>,
    pub service_projects: Vec<ServiceProject>,
    pub legacy_items: Vec<LegacyItem>,
    pub streaks: Streaks,
    pub preferences: Preferences,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            onboarding_complete: false,
            path: None,
            goals: Vec::new(),
            module_progress: default_module_progress(),
            journal_entries: Vec::new(),
            service_projects: Vec::new(),
            legacy_items: Vec::new(),
            streaks: Streaks::default(),
            preferences: Preferences::default(),
        }
    }
}

impl AppState {
    /// Restore the module progress invariants
    ///
    /// Pads or truncates `module_progress` to 12 entries, renumbers months by
    /// position, and pads or truncates every `weeks_completed` to 4 flags.
    pub fn normalize(&mut self) {
        self.module_progress.truncate(PROGRAM_MONTHS);
        while self.module_progress.len() < PROGRAM_MONTHS {
            let month = self.module_progress.len() as u8 + 1;
            self.module_progress.push(ModuleProgress::new(month));
        }

        for (index, progress) in self.module_progress.iter_mut().enumerate() {
            progress.month = index as u8 + 1;
            progress.weeks_completed.resize(WEEKS_PER_MONTH, false);
        }
    }

    /// Progress for a program month (1-12)
    pub fn progress_for(&self, month: u32) -> Option<&ModuleProgress> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        self.module_progress.get(index)
    }

    /// Completed weeks across the whole program
    pub fn weeks_done(&self) -> usize {
        self.module_progress.iter().map(ModuleProgress::weeks_done).sum()
    }

    /// Overall completion as a rounded percentage of all 48 weeks
    pub fn overall_progress(&self) -> u8 {
        let total = (PROGRAM_MONTHS * WEEKS_PER_MONTH) as f64;
        ((self.weeks_done() as f64 / total) * 100.0).round() as u8
    }

    /// Journal entries matching a filter, in the order written
    pub fn filter_journal(&self, filter: &str) -> Vec<&JournalEntry> {
        self.journal_entries
            .iter()
            .filter(|e| e.matches(filter))
            .collect()
    }
}

fn default_module_progress() -> Vec<ModuleProgress> {
    (1..=PROGRAM_MONTHS as u8).map(ModuleProgress::new).collect()
}

/// Serde helpers for the service project schedule
///
/// Dates are local wall-clock values without an offset, written as
/// `YYYY-MM-DDTHH:MM`. Seconds are only written when non-zero.
mod local_datetime {
    use chrono::{NaiveDateTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    const MINUTES: &str = "%Y-%m-%dT%H:%M";
    const SECONDS: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let format = if date.second() == 0 && date.nanosecond() == 0 {
            MINUTES
        } else {
            SECONDS
        };
        serializer.serialize_str(&date.format(format).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_local_datetime(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid service project date '{}'", raw))
        })
    }
}

/// Parse a local date/time as entered by the user
///
/// Accepts `YYYY-MM-DDTHH:MM`, optional seconds, and a space instead of `T`.
pub fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
    ]
    .iter()
    .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
