//! State document command handlers
//!
//! Direct access to the stored document for inspection, scripting and
//! repairs.

use std::io::Read;

use anyhow::{bail, Context, Result};

use pyp_core::{Config, StatePatch, Store};

use crate::output::{Output, OutputFormat};

/// Print the whole document
pub fn show(store: &Store, output: &Output) -> Result<()> {
    match output.format {
        OutputFormat::Quiet => println!("{}", store.backend_description()),
        _ => output.print_json(store.state())?,
    }
    Ok(())
}

/// Shallow-merge a JSON patch into the document
pub fn patch(store: &mut Store, json: String, output: &Output) -> Result<()> {
    let raw = if json == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read patch from stdin")?;
        buf
    } else {
        json
    };

    let patch = parse_patch(&raw)?;
    let keys = patch.touched_keys();
    let state = store.update(patch);

    match output.format {
        OutputFormat::Json => output.print_json(&state)?,
        _ if keys.is_empty() => output.message("Nothing to update"),
        _ => output.success(&format!("Updated {}", keys.join(", "))),
    }
    Ok(())
}

/// Print the state file location
pub fn path(config: &Config, output: &Output) -> Result<()> {
    let path = config.state_path();
    match output.format {
        OutputFormat::Json => output.print_json(&serde_json::json!({
            "path": path,
            "exists": path.exists(),
        }))?,
        _ => println!("{}", path.display()),
    }
    Ok(())
}

fn parse_patch(raw: &str) -> Result<StatePatch> {
    let value: serde_json::Value =
        serde_json::from_str(raw.trim()).context("Patch is not valid JSON")?;
    if !value.is_object() {
        bail!("Patch must be a JSON object, e.g. '{{\"goals\": [\"Be present\"]}}'");
    }
    serde_json::from_value(value).context(
        "Patch does not match the state layout. Valid keys: onboardingComplete, path, goals, \
         moduleProgress, journalEntries, serviceProjects, legacyItems, streaks, preferences",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyp_core::PracticePath;

    #[test]
    fn test_parse_patch() {
        let patch = parse_patch(r#"{"streaks": {"gratitude": 1, "presence": 0}}"#).unwrap();
        assert_eq!(patch.touched_keys(), vec!["streaks"]);

        let patch = parse_patch(r#"{"path": "group"}"#).unwrap();
        assert_eq!(patch.path, Some(Some(PracticePath::Group)));
    }

    #[test]
    fn test_parse_patch_rejects_bad_input() {
        assert!(parse_patch("[1, 2]").is_err());
        assert!(parse_patch("not json").is_err());
        assert!(parse_patch(r#"{"favoriteColor": "blue"}"#).is_err());
    }

    #[test]
    fn test_patch_applies_to_store() {
        let mut store = Store::in_memory();
        let output = Output::new(OutputFormat::Quiet);

        patch(&mut store, r#"{"goals": ["Forgive"]}"#.to_string(), &output).unwrap();

        let state = store.load();
        assert_eq!(state.goals, vec!["Forgive"]);
        assert!(!state.onboarding_complete);
    }
}
