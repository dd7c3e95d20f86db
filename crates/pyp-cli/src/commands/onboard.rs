//! Onboarding command handlers

use std::io::{self, Write};

use anyhow::{bail, Context, Result};

use pyp_core::export::write_export;
use pyp_core::models::parse_local_datetime;
use pyp_core::{CalendarEvent, Config, PracticePath, Store};

use crate::editor::confirm;
use crate::output::{Output, OutputFormat, Severity};

/// File stem of the kickoff calendar export
const KICKOFF_FILE: &str = "present-year-practice";

/// Answers gathered for onboarding
pub struct OnboardArgs {
    pub path: Option<PracticePath>,
    pub goals: Vec<String>,
    pub reminder: Option<String>,
    pub kickoff: Option<String>,
    pub yes: bool,
}

/// Greeting shown before onboarding is done
pub fn welcome(output: &Output) -> Result<()> {
    match output.format {
        OutputFormat::Human => {
            println!("Welcome to Present Year Practice.");
            println!();
            println!("Twelve months. Twelve themes. One year lived as if it were your last.");
            println!();
            println!("Begin with:");
            println!("  pyp onboard --path individual --goal \"Be present with family\"");
        }
        _ => output.notify(Severity::Info, "Onboarding not complete. Run `pyp onboard`."),
    }
    Ok(())
}

/// Complete onboarding
pub fn run(store: &mut Store, config: &Config, args: OnboardArgs, output: &Output) -> Result<()> {
    if store.state().onboarding_complete && !args.yes {
        if !output.should_prompt() {
            bail!("Onboarding is already complete. Pass --yes to start over.");
        }
        if !confirm("You have already started. Replace your path, goals and reminder?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let path = match args.path {
        Some(path) => path,
        None if output.should_prompt() => prompt_path()?,
        None => bail!("Choose a path with --path (individual, group, hybrid)"),
    };

    let mut goals = args.goals;
    if goals.is_empty() && output.should_prompt() {
        goals = prompt("Goals for the year (comma-separated, optional)")?
            .split(',')
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();
    }

    let reminder = args
        .reminder
        .unwrap_or_else(|| config.reminder_time.clone());

    let state = store.complete_onboarding(path, goals, &reminder)?;

    let kickoff_file = match args.kickoff {
        Some(raw) => {
            let start = parse_local_datetime(&raw)
                .with_context(|| format!("Invalid kickoff date '{}' (expected YYYY-MM-DDTHH:MM)", raw))?;
            let event = CalendarEvent::kickoff(start);
            Some(write_export(&config.export_dir(), KICKOFF_FILE, "ics", &event.to_ics())?)
        }
        None => None,
    };

    match output.format {
        OutputFormat::Json => {
            output.print_json(&serde_json::json!({
                "onboardingComplete": state.onboarding_complete,
                "path": state.path,
                "goals": state.goals,
                "preferences": state.preferences,
                "calendarFile": kickoff_file,
            }))?;
        }
        _ => {
            output.success(&format!("Your {} journey begins.", path));
            if !state.goals.is_empty() {
                output.message(&format!("Goals: {}", state.goals.join("; ")));
            }
            output.message(&format!(
                "Daily reminder at {}",
                state.preferences.reminder_time
            ));
            if let Some(file) = kickoff_file {
                output.success(&format!("Calendar reminder saved to {}", file.display()));
            }
        }
    }

    Ok(())
}

fn prompt_path() -> Result<PracticePath> {
    println!();
    println!("How will you walk this year?");
    println!();
    println!("  [1] Individual - a private, self-paced practice");
    println!("  [2] Group      - monthly circles with others");
    println!("  [3] Hybrid     - solo practice with occasional circles");
    println!();

    match prompt(">")?.as_str() {
        "1" => Ok(PracticePath::Individual),
        "2" => Ok(PracticePath::Group),
        "3" => Ok(PracticePath::Hybrid),
        other => other
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid choice. Please run the command again and enter 1, 2 or 3.")),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{} ", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
