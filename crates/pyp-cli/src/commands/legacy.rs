//! Legacy vault command handlers
//!
//! Letters and memories meant to outlive the writer.

use anyhow::{bail, Context, Result};

use pyp_core::export::{legacy_text, slugify, write_export};
use pyp_core::{Config, ForgivenessLetter, LegacyItem, LegacyKind, Store};

use crate::commands::ExportFormat;
use crate::editor::text_or_editor;
use crate::output::{short_id, Output};

/// Add a letter or memory
pub fn add(
    store: &mut Store,
    kind: LegacyKind,
    title: String,
    content: Option<String>,
    output: &Output,
) -> Result<()> {
    let hint = match kind {
        LegacyKind::Letter => format!("Letter: {}\nWrite what you want them to know.", title),
        LegacyKind::Memory => format!("Memory: {}\nDescribe the moment.", title),
    };
    let content = text_or_editor(content, &hint)?;

    let item = store
        .add_legacy_item(kind, &title, &content)
        .context("Failed to save legacy item")?;

    if output.is_json() {
        output.print_json(&item)?;
    } else {
        output.success(&format!("Saved {} {}", item.kind, short_id(&item.id)));
    }
    Ok(())
}

/// List the vault
pub fn list(store: &Store, output: &Output) -> Result<()> {
    output.print_legacy_items(&store.state().legacy_items)
}

/// Show one item
pub fn show(store: &Store, id: String, output: &Output) -> Result<()> {
    let item = find_item(store, &id)?;
    output.print_legacy_item(item)
}

/// Walk through the forgiveness exercise and keep the letter
pub fn forgive(
    store: &mut Store,
    to: String,
    hurt: Option<String>,
    needs: Option<String>,
    release: Option<String>,
    output: &Output,
) -> Result<()> {
    let letter = ForgivenessLetter {
        hurt: text_or_editor(hurt, &format!("What happened with {}, and how did it hurt?", to))?,
        needs: text_or_editor(needs, "What did you need that you didn't receive?")?,
        release: text_or_editor(release, "What are you ready to release?")?,
        recipient: to,
    };

    let item = store.save_forgiveness_letter(&letter)?;

    if output.is_json() {
        output.print_json(&item)?;
    } else {
        output.success(&format!("{} saved to your vault", item.title));
        output.message("");
        output.message(&item.content);
    }
    Ok(())
}

/// Export one item to `<export_dir>/legacy-<title>.<txt|pdf>`
pub fn export(
    store: &Store,
    config: &Config,
    id: String,
    format: ExportFormat,
    output: &Output,
) -> Result<()> {
    let item = find_item(store, &id)?;

    let content = format.render(&item.title, &legacy_text(item))?;
    let path = write_export(
        &config.export_dir(),
        &export_stem(item),
        format.extension(),
        content,
    )
    .context("Failed to export legacy item")?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "file": path,
            "format": format.extension(),
            "id": item.id,
        }))?;
    } else if output.is_quiet() {
        println!("{}", path.display());
    } else {
        output.success(&format!("Exported to {}", path.display()));
    }
    Ok(())
}

fn export_stem(item: &LegacyItem) -> String {
    format!("legacy-{}", slugify(&item.title))
}

/// Find an item by full id or prefix
fn find_item<'a>(store: &'a Store, id: &str) -> Result<&'a LegacyItem> {
    let items = &store.state().legacy_items;

    if let Some(item) = items.iter().find(|i| i.id == id) {
        return Ok(item);
    }

    let matches: Vec<_> = items.iter().filter(|i| i.id.starts_with(id)).collect();

    match matches.len() {
        0 => bail!("No legacy item found matching: {}", id),
        1 => Ok(matches[0]),
        _ => {
            eprintln!("Multiple items match '{}':", id);
            for item in &matches {
                eprintln!("  {} - {}", item.id, item.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    fn export_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().join("data"),
            export_dir: Some(temp_dir.path().join("exports")),
            ..Config::default()
        }
    }

    #[test]
    fn test_export_is_prefixed_and_stays_in_export_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = export_config(&temp_dir);
        let mut store = Store::in_memory();
        let item = store
            .add_legacy_item(LegacyKind::Letter, "/Letter to Mom/Dad", "Thank you.")
            .unwrap();

        let output = Output::new(OutputFormat::Quiet);
        export(&store, &config, item.id.clone(), ExportFormat::Txt, &output).unwrap();
        export(&store, &config, item.id, ExportFormat::Pdf, &output).unwrap();

        let exports = temp_dir.path().join("exports");
        let text = std::fs::read_to_string(exports.join("legacy-letter-to-mom-dad.txt")).unwrap();
        assert!(text.ends_with("Thank you.\n"));

        let pdf = std::fs::read(exports.join("legacy-letter-to-mom-dad.pdf")).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}
