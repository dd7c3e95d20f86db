//! Journal command handlers

use anyhow::{Context, Result};

use pyp_core::export::{journal_text, write_export};
use pyp_core::models::JOURNAL_TAGS;
use pyp_core::{Config, JournalEntry, Store};

use crate::commands::ExportFormat;
use crate::editor::text_or_editor;
use crate::output::Output;

/// Write a journal entry
pub fn add(
    store: &mut Store,
    content: Option<String>,
    tags: Vec<String>,
    mood: Option<u8>,
    private: bool,
    output: &Output,
) -> Result<()> {
    let hint = format!(
        "Write your journal entry below. Lines starting with # are ignored.\nSuggested tags: {}",
        JOURNAL_TAGS.join(", ")
    );
    let content = text_or_editor(content, &hint)?;

    let mut entry = JournalEntry::new(content);
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() {
            entry.add_tag(tag);
        }
    }
    if let Some(mood) = mood {
        entry.set_mood(mood);
    }
    entry.set_private(private);

    let entry = store.add_journal_entry(entry)?;

    if output.is_json() {
        output.print_json(&entry)?;
    } else {
        output.success("Journal entry saved");
    }
    Ok(())
}

/// List entries, optionally filtered by tag or text
pub fn list(store: &Store, filter: Option<String>, output: &Output) -> Result<()> {
    let entries = store
        .state()
        .filter_journal(filter.as_deref().unwrap_or(""));
    output.print_journal_entries(&entries)
}

/// Export entries to `<export_dir>/<name>.<txt|pdf>`
pub fn export(
    store: &Store,
    config: &Config,
    filter: Option<String>,
    name: String,
    format: ExportFormat,
    output: &Output,
) -> Result<()> {
    let entries: Vec<JournalEntry> = store
        .state()
        .filter_journal(filter.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();

    if entries.is_empty() {
        output.warning("No journal entries to export");
        return Ok(());
    }

    let content = format.render("Journal", &journal_text(&entries))?;
    let path = write_export(&config.export_dir(), &name, format.extension(), content)
        .context("Failed to export journal")?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "file": path,
            "format": format.extension(),
            "entries": entries.len(),
        }))?;
    } else if output.is_quiet() {
        println!("{}", path.display());
    } else {
        output.success(&format!(
            "Exported {} entr{} to {}",
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" },
            path.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use pyp_core::export::pdf::LINES_PER_PAGE;
    use tempfile::TempDir;

    #[test]
    fn test_export_pdf_and_reject_path_names() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            export_dir: Some(temp_dir.path().join("exports")),
            ..Config::default()
        };
        let mut store = Store::in_memory();
        for day in 0..LINES_PER_PAGE {
            store
                .add_journal_entry(JournalEntry::new(format!("Entry {}", day)))
                .unwrap();
        }
        let output = Output::new(OutputFormat::Quiet);

        export(&store, &config, None, "journal-export".to_string(), ExportFormat::Pdf, &output)
            .unwrap();
        let pdf = std::fs::read(temp_dir.path().join("exports/journal-export.pdf")).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let escaped = export(&store, &config, None, "../journal".to_string(), ExportFormat::Txt, &output);
        assert!(escaped.is_err());
        assert!(!temp_dir.path().join("journal.txt").exists());
    }
}
