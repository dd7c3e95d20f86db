//! Module command handlers

use anyhow::{anyhow, Result};
use chrono::Local;

use pyp_core::catalog::{self, current_module};
use pyp_core::Store;

use crate::editor::write_in_editor;
use crate::output::Output;

/// List all modules with progress
pub fn list(store: &Store, output: &Output) -> Result<()> {
    output.print_modules(catalog::modules(), &store.state().module_progress)
}

/// Show one module; defaults to the module for the current month
pub fn show(store: &Store, month: Option<u32>, output: &Output) -> Result<()> {
    let module = match month {
        Some(month) => catalog::module(month)
            .ok_or_else(|| anyhow!("No module for month {} (choose 1-12)", month))?,
        None => current_module(Local::now().date_naive()),
    };

    let progress = store.state().progress_for(u32::from(module.month));
    output.print_module(module, progress)
}

/// Toggle (or set) a week
pub fn toggle(
    store: &mut Store,
    month: u32,
    week: usize,
    set: Option<bool>,
    output: &Output,
) -> Result<()> {
    let progress = match set {
        Some(done) => store.set_week_completed(month, week, done)?,
        None => store.toggle_week(month, week)?,
    };

    let done = progress.weeks_completed[week - 1];
    if output.is_json() {
        output.print_json(&progress)?;
    } else {
        output.success(&format!(
            "Month {} week {} marked {} ({}/4 weeks)",
            month,
            week,
            if done { "done" } else { "not done" },
            progress.weeks_done()
        ));
        if progress.is_complete() {
            output.message("Month complete. Take a moment with your reflection.");
        }
    }
    Ok(())
}

/// Save the reflection for a month
pub fn reflect(store: &mut Store, month: u32, text: Option<String>, output: &Output) -> Result<()> {
    let module = catalog::module(month)
        .ok_or_else(|| anyhow!("No module for month {} (choose 1-12)", month))?;

    let text = match text {
        Some(text) => text,
        None => {
            let hint = format!(
                "Reflection for month {}: {}\nLines starting with # are ignored.",
                module.month, module.theme
            );
            let current = store
                .state()
                .progress_for(month)
                .map(|p| p.reflection.clone())
                .unwrap_or_default();
            write_in_editor(&hint, &current)?
        }
    };

    let progress = store.save_module_reflection(month, &text)?;

    if output.is_json() {
        output.print_json(&progress)?;
    } else {
        output.success(&format!("Reflection saved for {}", module.theme));
    }
    Ok(())
}
