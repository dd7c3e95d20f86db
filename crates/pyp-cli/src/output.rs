//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)
//!
//! Status notifications (the app's toasts) carry a severity and go through
//! `notify`.

use anyhow::{Context, Result};
use serde::Serialize;

use pyp_core::catalog::Quote;
use pyp_core::meeting::Agenda;
use pyp_core::{JournalEntry, LegacyItem, Module, ModuleProgress, ServiceProject};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Severity of a status notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
}

impl Severity {
    fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "•",
            Severity::Success => "✓",
            Severity::Warning => "⚠",
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print any serializable value as pretty JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{}", json);
        Ok(())
    }

    /// Show a status notification
    ///
    /// Warnings go to stderr in human mode. Nothing is shown in quiet mode.
    pub fn notify(&self, severity: Severity, message: &str) {
        match self.format {
            OutputFormat::Human => match severity {
                Severity::Warning => eprintln!("{} {}", severity.symbol(), message),
                _ => println!("{} {}", severity.symbol(), message),
            },
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": severity, "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        self.notify(Severity::Success, message);
    }

    pub fn warning(&self, message: &str) {
        self.notify(Severity::Warning, message);
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print journal entries, newest first
    pub fn print_journal_entries(&self, entries: &[&JournalEntry]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if entries.is_empty() {
                    println!("No journal entries found.");
                    return Ok(());
                }
                for entry in entries.iter().rev() {
                    let tags = if entry.tags.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", entry.tags.join(", "))
                    };
                    let private = if entry.is_private { " (private)" } else { "" };
                    println!(
                        "{} | {} | mood {:>2}{}{} | {}",
                        short_id(&entry.id),
                        entry.date.format("%Y-%m-%d"),
                        entry.mood,
                        private,
                        tags,
                        truncate_line(&entry.content, 50)
                    );
                }
                println!("\n{} entr{}", entries.len(), if entries.len() == 1 { "y" } else { "ies" });
            }
            OutputFormat::Json => self.print_json(entries)?,
            OutputFormat::Quiet => {
                for entry in entries {
                    println!("{}", entry.id);
                }
            }
        }
        Ok(())
    }

    /// Print the module overview with per-month progress
    pub fn print_modules(&self, modules: &[Module], progress: &[ModuleProgress]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                for module in modules {
                    let done = progress
                        .get(usize::from(module.month) - 1)
                        .map(ModuleProgress::weeks_done)
                        .unwrap_or(0);
                    println!(
                        "{:>2}. {:<32} {}",
                        module.month,
                        module.theme,
                        week_bar(done)
                    );
                }
            }
            OutputFormat::Json => {
                let rows: Vec<_> = modules
                    .iter()
                    .map(|m| {
                        let weeks = progress
                            .get(usize::from(m.month) - 1)
                            .map(|p| p.weeks_completed.clone())
                            .unwrap_or_default();
                        serde_json::json!({
                            "month": m.month,
                            "theme": m.theme,
                            "weeksCompleted": weeks,
                        })
                    })
                    .collect();
                self.print_json(&rows)?;
            }
            OutputFormat::Quiet => {
                for module in modules {
                    println!("{}", module.month);
                }
            }
        }
        Ok(())
    }

    /// Print one module with its weekly content and the user's progress
    pub fn print_module(&self, module: &Module, progress: Option<&ModuleProgress>) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("Month {}: {}", module.month, module.theme);
                println!();
                println!("{}", module.outcomes);
                println!();
                println!("Practices:");
                for practice in module.practices {
                    println!("  - {}", practice);
                }

                for unit in &module.weekly_content {
                    let done = progress
                        .and_then(|p| p.weeks_completed.get(usize::from(unit.week) - 1))
                        .copied()
                        .unwrap_or(false);
                    println!();
                    println!(
                        "[{}] Week {}: {}",
                        if done { "x" } else { " " },
                        unit.week,
                        unit.title
                    );
                    println!("    Practice:   {}", unit.practice);
                    println!("    Reflection: {}", unit.reflection);
                }

                let links = module.assets.links();
                if !links.is_empty() {
                    println!();
                    println!("Resources:");
                    for (kind, path) in links {
                        println!("  {:<6} {}", kind, path);
                    }
                }

                if let Some(reflection) = progress.map(|p| p.reflection.as_str()) {
                    if !reflection.trim().is_empty() {
                        println!();
                        println!("── Your reflection ──");
                        println!("{}", reflection);
                    }
                }
            }
            OutputFormat::Json => {
                self.print_json(&serde_json::json!({
                    "module": module,
                    "progress": progress,
                }))?;
            }
            OutputFormat::Quiet => {
                println!("{}", module.month);
            }
        }
        Ok(())
    }

    /// Print service projects
    pub fn print_service_projects(&self, projects: &[ServiceProject]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if projects.is_empty() {
                    println!("No service projects yet.");
                    return Ok(());
                }
                for project in projects {
                    self.print_service_project_human(project);
                }
                println!("{} project(s)", projects.len());
            }
            OutputFormat::Json => self.print_json(projects)?,
            OutputFormat::Quiet => {
                for project in projects {
                    println!("{}", project.id);
                }
            }
        }
        Ok(())
    }

    /// Print a single service project
    pub fn print_service_project(&self, project: &ServiceProject) -> Result<()> {
        match self.format {
            OutputFormat::Human => self.print_service_project_human(project),
            OutputFormat::Json => self.print_json(project)?,
            OutputFormat::Quiet => println!("{}", project.id),
        }
        Ok(())
    }

    fn print_service_project_human(&self, project: &ServiceProject) {
        println!(
            "{} | {} | {} ({}/{} tasks)",
            short_id(&project.id),
            project.date.format("%Y-%m-%d %H:%M"),
            project.cause,
            project.tasks_done(),
            project.tasks.len()
        );
        for (i, task) in project.tasks.iter().enumerate() {
            println!(
                "    {}. [{}] {}",
                i + 1,
                if task.done { "x" } else { " " },
                task.text
            );
        }
        if project.has_reflection() {
            println!("    Reflection: {}", truncate_line(&project.reflection, 60));
        }
        println!();
    }

    /// Print the legacy vault
    pub fn print_legacy_items(&self, items: &[LegacyItem]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("Your legacy vault is empty.");
                    return Ok(());
                }
                for item in items {
                    println!(
                        "{} | {} | {:<6} | {}",
                        short_id(&item.id),
                        item.created_at.format("%Y-%m-%d"),
                        item.kind,
                        truncate(&item.title, 50)
                    );
                }
                println!("\n{} item(s)", items.len());
            }
            OutputFormat::Json => self.print_json(items)?,
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.id);
                }
            }
        }
        Ok(())
    }

    /// Print a single legacy item in full
    pub fn print_legacy_item(&self, item: &LegacyItem) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", item.id);
                println!("Type:    {}", item.kind);
                println!("Title:   {}", item.title);
                println!("Created: {}", item.created_at.format("%Y-%m-%d %H:%M"));
                println!();
                println!("{}", item.content);
            }
            OutputFormat::Json => self.print_json(item)?,
            OutputFormat::Quiet => println!("{}", item.id),
        }
        Ok(())
    }

    /// Print a quote
    pub fn print_quote(&self, quote: &Quote) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("\"{}\"", quote.text);
                println!("    - {}", quote.author);
            }
            OutputFormat::Json => self.print_json(quote)?,
            OutputFormat::Quiet => println!("{}", quote.text),
        }
        Ok(())
    }

    /// Print the meeting agendas
    pub fn print_agendas(&self, agendas: &[Agenda]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                for agenda in agendas {
                    println!("{} ({})", agenda.title, agenda.key);
                    for segment in agenda.segments {
                        println!("  {:<24} {:>3} min", segment.name, segment.minutes);
                    }
                    println!();
                }
            }
            OutputFormat::Json => self.print_json(agendas)?,
            OutputFormat::Quiet => {
                for agenda in agendas {
                    println!("{}", agenda.key);
                }
            }
        }
        Ok(())
    }
}

/// First 8 characters of an id, for list views
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Four-week progress marker, e.g. `[##--]`
fn week_bar(done: usize) -> String {
    let done = done.min(4);
    format!("[{}{}]", "#".repeat(done), "-".repeat(4 - done))
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate to first line and max length
fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("ééééééééééé", 5), "éé...");
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("single line", 20), "single line");
        assert_eq!(truncate_line("line one\nline two", 20), "line one");
        assert_eq!(
            truncate_line("very long single line here", 10),
            "very lo..."
        );
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0c9a7f3e-1b2d-4c5e"), "0c9a7f3e");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_week_bar() {
        assert_eq!(week_bar(0), "[----]");
        assert_eq!(week_bar(3), "[###-]");
        assert_eq!(week_bar(9), "[####]");
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::json!({"status": Severity::Warning});
        assert_eq!(json["status"], "warning");
    }
}
