//! Practice operations
//!
//! Every user action that changes state lives here. Each one builds a
//! `StatePatch` touching only the top-level keys it owns and goes through
//! `Store::update`. Invalid input is rejected before the store is touched.

use chrono::{NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::models::{
    AppState, JournalEntry, LegacyItem, LegacyKind, ModuleProgress, PracticePath, Preferences,
    ServiceProject, ServiceTask, Streaks, PROGRAM_MONTHS, WEEKS_PER_MONTH,
};
use crate::store::{StatePatch, Store};

/// Mood recorded with a captured gratitude
pub const GRATITUDE_MOOD: u8 = 7;

/// Errors for invalid practice input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PracticeError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("Month {0} is outside the program (1-12)")]
    MonthOutOfRange(u32),

    #[error("Week {0} is outside the month (1-4)")]
    WeekOutOfRange(usize),

    #[error("No service project found matching: {0}")]
    ProjectNotFound(String),

    #[error("Ambiguous service project id '{0}'. Please provide more characters.")]
    AmbiguousProject(String),

    #[error("Project {project} has no task {task}")]
    TaskOutOfRange { project: String, task: usize },

    #[error("Invalid reminder time '{0}' (expected HH:MM)")]
    InvalidReminderTime(String),
}

/// Inputs of the forgiveness letter exercise
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgivenessLetter {
    pub recipient: String,
    pub hurt: String,
    pub needs: String,
    pub release: String,
}

impl ForgivenessLetter {
    /// Title the letter is stored under
    pub fn title(&self) -> String {
        format!("Forgiveness Letter to {}", self.recipient.trim())
    }

    /// Letter body
    pub fn compose(&self) -> String {
        format!(
            "Dear {},\n\n{}\n\nWhat I needed was: {}\n\n{}\n\nWith release and peace.",
            self.recipient.trim(),
            self.hurt.trim(),
            self.needs.trim(),
            self.release.trim()
        )
        .trim()
        .to_string()
    }
}

/// Check a reminder time written as `HH:MM`
pub fn parse_reminder_time(raw: &str) -> Result<NaiveTime, PracticeError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| PracticeError::InvalidReminderTime(raw.to_string()))
}

fn require(value: &str, field: &'static str) -> Result<(), PracticeError> {
    if value.trim().is_empty() {
        Err(PracticeError::Empty { field })
    } else {
        Ok(())
    }
}

fn month_index(month: u32) -> Result<usize, PracticeError> {
    match usize::try_from(month) {
        Ok(m) if (1..=PROGRAM_MONTHS).contains(&m) => Ok(m - 1),
        _ => Err(PracticeError::MonthOutOfRange(month)),
    }
}

/// Convert a 1-based week number into an index
fn week_index(week: usize) -> Result<usize, PracticeError> {
    if (1..=WEEKS_PER_MONTH).contains(&week) {
        Ok(week - 1)
    } else {
        Err(PracticeError::WeekOutOfRange(week))
    }
}

impl AppState {
    /// Find a service project by full id or unique id prefix
    pub fn find_service_project(&self, id: &str) -> Result<&ServiceProject, PracticeError> {
        self.service_projects
            .get(self.service_project_index(id)?)
            .ok_or_else(|| PracticeError::ProjectNotFound(id.to_string()))
    }

    fn service_project_index(&self, id: &str) -> Result<usize, PracticeError> {
        if let Some(index) = self.service_projects.iter().position(|p| p.id == id) {
            return Ok(index);
        }

        let matches: Vec<usize> = self
            .service_projects
            .iter()
            .enumerate()
            .filter(|(_, p)| !id.is_empty() && p.id.starts_with(id))
            .map(|(i, _)| i)
            .collect();

        match matches.len() {
            0 => Err(PracticeError::ProjectNotFound(id.to_string())),
            1 => Ok(matches[0]),
            _ => Err(PracticeError::AmbiguousProject(id.to_string())),
        }
    }
}

impl Store {
    // ==================== Onboarding ====================

    /// Finish onboarding: record the path, goals and reminder time
    ///
    /// Blank and repeated goals are dropped.
    pub fn complete_onboarding(
        &mut self,
        path: PracticePath,
        goals: Vec<String>,
        reminder_time: &str,
    ) -> Result<AppState, PracticeError> {
        parse_reminder_time(reminder_time)?;

        let mut unique_goals: Vec<String> = Vec::new();
        for goal in goals {
            let goal = goal.trim().to_string();
            if !goal.is_empty() && !unique_goals.contains(&goal) {
                unique_goals.push(goal);
            }
        }

        Ok(self.update(
            StatePatch::new()
                .onboarding_complete(true)
                .path(Some(path))
                .goals(unique_goals)
                .preferences(Preferences {
                    reminder_time: reminder_time.trim().to_string(),
                    notifications_enabled: true,
                }),
        ))
    }

    /// Replace reminder preferences
    pub fn set_preferences(&mut self, preferences: Preferences) -> Result<Preferences, PracticeError> {
        parse_reminder_time(&preferences.reminder_time)?;
        Ok(self
            .update(StatePatch::new().preferences(preferences))
            .preferences)
    }

    // ==================== Journal ====================

    /// Append a journal entry
    pub fn add_journal_entry(&mut self, entry: JournalEntry) -> Result<JournalEntry, PracticeError> {
        require(&entry.content, "Journal entry")?;

        let mut entries = self.load().journal_entries;
        entries.push(entry.clone());
        self.update(StatePatch::new().journal_entries(entries));

        Ok(entry)
    }

    /// Record a gratitude: journal entry plus gratitude streak
    pub fn capture_gratitude(&mut self, text: &str) -> Result<JournalEntry, PracticeError> {
        require(text, "Gratitude")?;

        let mut entry = JournalEntry::new(format!("Gratitude: {}", text.trim()));
        entry.add_tag("gratitude");
        entry.set_mood(GRATITUDE_MOOD);

        let state = self.load();
        let mut entries = state.journal_entries;
        entries.push(entry.clone());
        let streaks = Streaks {
            gratitude: state.streaks.gratitude.saturating_add(1),
            ..state.streaks
        };

        self.update(
            StatePatch::new()
                .journal_entries(entries)
                .streaks(streaks),
        );

        Ok(entry)
    }

    /// Count one presence practice
    pub fn record_presence(&mut self) -> Streaks {
        let current = self.load().streaks;
        let streaks = Streaks {
            presence: current.presence.saturating_add(1),
            ..current
        };
        self.update(StatePatch::new().streaks(streaks)).streaks
    }

    // ==================== Modules ====================

    /// Mark a week (1-4) of a month (1-12) done or not done
    pub fn set_week_completed(
        &mut self,
        month: u32,
        week: usize,
        done: bool,
    ) -> Result<ModuleProgress, PracticeError> {
        self.change_module(month, |progress| {
            let index = week_index(week)?;
            progress.weeks_completed[index] = done;
            Ok(())
        })
    }

    /// Flip a week (1-4) of a month (1-12)
    pub fn toggle_week(&mut self, month: u32, week: usize) -> Result<ModuleProgress, PracticeError> {
        self.change_module(month, |progress| {
            let index = week_index(week)?;
            progress.weeks_completed[index] = !progress.weeks_completed[index];
            Ok(())
        })
    }

    /// Replace the reflection for a month
    pub fn save_module_reflection(
        &mut self,
        month: u32,
        reflection: &str,
    ) -> Result<ModuleProgress, PracticeError> {
        self.change_module(month, |progress| {
            progress.reflection = reflection.to_string();
            Ok(())
        })
    }

    /// Read the whole progress vector, change one month, write it all back
    fn change_module<F>(&mut self, month: u32, change: F) -> Result<ModuleProgress, PracticeError>
    where
        F: FnOnce(&mut ModuleProgress) -> Result<(), PracticeError>,
    {
        let index = month_index(month)?;
        let mut progress = self.load().module_progress;
        change(&mut progress[index])?;

        let state = self.update(StatePatch::new().module_progress(progress));
        Ok(state.module_progress[index].clone())
    }

    // ==================== Service ====================

    /// Create a service project; blank tasks are dropped
    pub fn create_service_project<I, S>(
        &mut self,
        cause: &str,
        date: NaiveDateTime,
        tasks: I,
    ) -> Result<ServiceProject, PracticeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        require(cause, "Cause")?;

        let project = ServiceProject::new(cause.trim(), date, tasks);
        let mut projects = self.load().service_projects;
        projects.push(project.clone());
        self.update(StatePatch::new().service_projects(projects));

        Ok(project)
    }

    /// Flip a task (1-based) on a service project
    pub fn toggle_service_task(
        &mut self,
        project_id: &str,
        task: usize,
    ) -> Result<ServiceTask, PracticeError> {
        self.change_service_project(project_id, |project| {
            let slot = task
                .checked_sub(1)
                .and_then(|i| project.tasks.get_mut(i))
                .ok_or_else(|| PracticeError::TaskOutOfRange {
                    project: project.id.clone(),
                    task,
                })?;
            slot.done = !slot.done;
            Ok(())
        })
        .and_then(|project| {
            project
                .tasks
                .get(task - 1)
                .cloned()
                .ok_or(PracticeError::TaskOutOfRange {
                    project: project.id.clone(),
                    task,
                })
        })
    }

    /// Store the reflection for a service project
    pub fn save_service_reflection(
        &mut self,
        project_id: &str,
        reflection: &str,
    ) -> Result<ServiceProject, PracticeError> {
        require(reflection, "Reflection")?;
        self.change_service_project(project_id, |project| {
            project.reflection = reflection.to_string();
            Ok(())
        })
    }

    fn change_service_project<F>(
        &mut self,
        project_id: &str,
        change: F,
    ) -> Result<ServiceProject, PracticeError>
    where
        F: FnOnce(&mut ServiceProject) -> Result<(), PracticeError>,
    {
        let state = self.load();
        let index = state.service_project_index(project_id)?;
        let mut projects = state.service_projects;
        change(&mut projects[index])?;

        let state = self.update(StatePatch::new().service_projects(projects));
        Ok(state.service_projects[index].clone())
    }

    // ==================== Legacy vault ====================

    /// Add a letter or memory to the vault
    pub fn add_legacy_item(
        &mut self,
        kind: LegacyKind,
        title: &str,
        content: &str,
    ) -> Result<LegacyItem, PracticeError> {
        require(title, "Title")?;
        require(content, "Content")?;
        self.push_legacy_item(LegacyItem::new(kind, title.trim(), content))
    }

    /// Compose a forgiveness letter and keep it in the vault
    pub fn save_forgiveness_letter(
        &mut self,
        letter: &ForgivenessLetter,
    ) -> Result<LegacyItem, PracticeError> {
        require(&letter.recipient, "Recipient")?;
        self.push_legacy_item(LegacyItem::new(
            LegacyKind::Letter,
            letter.title(),
            letter.compose(),
        ))
    }

    fn push_legacy_item(&mut self, item: LegacyItem) -> Result<LegacyItem, PracticeError> {
        let mut items = self.load().legacy_items;
        items.push(item.clone());
        self.update(StatePatch::new().legacy_items(items));
        Ok(item)
    }
}
