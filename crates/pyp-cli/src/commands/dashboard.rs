//! Dashboard command handlers
//!
//! The overview plus the two quick actions offered on it: capturing a
//! gratitude and recording a presence practice.

use anyhow::Result;
use chrono::Local;

use pyp_core::catalog::{current_module, quote_of_the_day};
use pyp_core::Store;

use crate::output::{Output, OutputFormat};

/// Show progress, streaks and today's quote
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let state = store.state();
    let module = current_module(Local::now().date_naive());
    let month_progress = state.progress_for(u32::from(module.month));
    let quote = quote_of_the_day();

    match output.format {
        OutputFormat::Json => {
            output.print_json(&serde_json::json!({
                "path": state.path,
                "goals": state.goals,
                "overallProgress": state.overall_progress(),
                "currentModule": {
                    "month": module.month,
                    "theme": module.theme,
                    "weeksCompleted": month_progress.map(|p| p.weeks_completed.clone()),
                },
                "streaks": state.streaks,
                "counts": {
                    "journalEntries": state.journal_entries.len(),
                    "serviceProjects": state.service_projects.len(),
                    "legacyItems": state.legacy_items.len(),
                },
                "quote": quote,
            }))?;
        }
        OutputFormat::Quiet => {
            println!("{}", state.overall_progress());
        }
        OutputFormat::Human => {
            println!("Present Year Practice");
            println!("=====================");
            println!();
            if let Some(path) = state.path {
                println!("Path:     {}", path);
            }
            println!(
                "Progress: {}% ({} of 48 weeks)",
                state.overall_progress(),
                state.weeks_done()
            );
            println!();
            println!("This month: {} (month {})", module.theme, module.month);
            if let Some(progress) = month_progress {
                for unit in &module.weekly_content {
                    let done = progress
                        .weeks_completed
                        .get(usize::from(unit.week) - 1)
                        .copied()
                        .unwrap_or(false);
                    println!("  [{}] {}", if done { "x" } else { " " }, unit.title);
                }
            }
            println!();
            println!("Streaks:");
            println!("  Gratitude: {}", state.streaks.gratitude);
            println!("  Presence:  {}", state.streaks.presence);
            println!();
            println!(
                "Journal: {}  Service: {}  Legacy: {}",
                state.journal_entries.len(),
                state.service_projects.len(),
                state.legacy_items.len()
            );
            if !state.goals.is_empty() {
                println!();
                println!("Goals:");
                for goal in &state.goals {
                    println!("  - {}", goal);
                }
            }
            println!();
            output.print_quote(quote)?;
        }
    }

    Ok(())
}

/// Capture a gratitude
pub fn gratitude(store: &mut Store, text: String, output: &Output) -> Result<()> {
    let entry = store.capture_gratitude(&text)?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "entry": entry,
            "streaks": store.state().streaks,
        }))?;
    } else {
        output.success(&format!(
            "Gratitude captured. Streak: {}",
            store.state().streaks.gratitude
        ));
    }
    Ok(())
}

/// Record a presence practice
pub fn presence(store: &mut Store, output: &Output) -> Result<()> {
    let streaks = store.record_presence();

    if output.is_json() {
        output.print_json(&streaks)?;
    } else {
        output.success(&format!("Presence practiced. Streak: {}", streaks.presence));
    }
    Ok(())
}
