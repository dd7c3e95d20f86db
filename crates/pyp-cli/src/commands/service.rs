//! Service project command handlers

use anyhow::{anyhow, Context, Result};

use pyp_core::export::{slugify, write_export};
use pyp_core::models::parse_local_datetime;
use pyp_core::{CalendarEvent, Config, ServiceProject, Store};

use crate::editor::text_or_editor;
use crate::output::{short_id, Output};

/// Plan a new project
pub fn create(
    store: &mut Store,
    config: &Config,
    cause: String,
    date: String,
    tasks: Vec<String>,
    ics: bool,
    output: &Output,
) -> Result<()> {
    let date = parse_local_datetime(&date)
        .ok_or_else(|| anyhow!("Invalid date '{}' (expected YYYY-MM-DDTHH:MM)", date))?;

    let project = store
        .create_service_project(&cause, date, tasks)
        .context("Failed to create service project")?;

    output.success(&format!(
        "Created service project {}: {}",
        short_id(&project.id),
        project.cause
    ));
    output.print_service_project(&project)?;

    if ics {
        write_calendar(config, &project, output)?;
    }
    Ok(())
}

/// List all projects
pub fn list(store: &Store, output: &Output) -> Result<()> {
    output.print_service_projects(&store.state().service_projects)
}

/// Toggle a task
pub fn toggle(store: &mut Store, id: String, task: usize, output: &Output) -> Result<()> {
    let updated = store.toggle_service_task(&id, task)?;

    if output.is_json() {
        output.print_json(&updated)?;
    } else {
        output.success(&format!(
            "{} {}",
            if updated.done { "Done:" } else { "Not done:" },
            updated.text
        ));
    }
    Ok(())
}

/// Save the reflection for a project
pub fn reflect(store: &mut Store, id: String, text: Option<String>, output: &Output) -> Result<()> {
    let cause = store.state().find_service_project(&id)?.cause.clone();
    let hint = format!(
        "Reflection on: {}\nWhat did you give, and what did you receive?",
        cause
    );
    let text = text_or_editor(text, &hint)?;

    let project = store.save_service_reflection(&id, &text)?;

    if output.is_json() {
        output.print_json(&project)?;
    } else {
        output.success(&format!("Reflection saved for {}", project.cause));
    }
    Ok(())
}

/// Write a calendar file for a project
pub fn ics(store: &Store, config: &Config, id: String, output: &Output) -> Result<()> {
    let project = store.state().find_service_project(&id)?;
    write_calendar(config, project, output)
}

fn write_calendar(config: &Config, project: &ServiceProject, output: &Output) -> Result<()> {
    let event = CalendarEvent::service_project(project);
    let stem = format!("service-{}", slugify(&project.cause));
    let path = write_export(&config.export_dir(), &stem, "ics", &event.to_ics())
        .context("Failed to write calendar file")?;

    if output.is_quiet() {
        println!("{}", path.display());
    } else {
        output.success(&format!("Calendar file saved to {}", path.display()));
    }
    Ok(())
}
