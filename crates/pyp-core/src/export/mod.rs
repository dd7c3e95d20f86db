//! Document export
//!
//! Renders journal entries and legacy items as text, and writes export files
//! (`.txt`, `.pdf`, `.ics`) to a directory. PDF layout lives in [`pdf`].

pub mod pdf;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

use crate::models::{JournalEntry, LegacyItem};

/// Long date form, e.g. `January 1st, 2024`
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn local_date(timestamp: &DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Render journal entries for a `.txt` export
///
/// Each entry is its date, mood, tags, body and a `---` separator.
pub fn journal_text(entries: &[JournalEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}\nMood: {}/10\nTags: {}\n\n{}\n\n---\n",
                long_date(local_date(&entry.date)),
                entry.mood,
                entry.tags.join(", "),
                entry.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a single legacy item for export
pub fn legacy_text(item: &LegacyItem) -> String {
    format!(
        "{}\nCreated: {}\n\n---\n\n{}\n",
        item.title,
        long_date(local_date(&item.created_at)),
        item.content
    )
}

/// Turn a title into a file name stem
///
/// Lowercases, keeps alphanumeric runs and joins them with `-`. Titles with
/// nothing usable become `untitled`.
pub fn slugify(title: &str) -> String {
    let slug = title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// A stem must name a single file inside the export directory
fn check_stem(stem: &str) -> Result<()> {
    if stem.trim().is_empty() {
        bail!("Export file name is empty");
    }
    if stem.starts_with('.') || stem.chars().any(std::path::is_separator) {
        bail!(
            "Invalid export file name '{}': use a plain name without '/' or a leading '.'",
            stem
        );
    }
    Ok(())
}

/// Write an export file as `<dir>/<stem>.<extension>`
///
/// Creates the directory if needed and returns the written path. Stems that
/// would leave `dir` are rejected before anything is written.
pub fn write_export(
    dir: &Path,
    stem: &str,
    extension: &str,
    content: impl AsRef<[u8]>,
) -> Result<PathBuf> {
    check_stem(stem)?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {:?}", dir))?;

    let path = dir.join(format!("{}.{}", stem, extension));
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write export {:?}", path))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LegacyKind;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date(date(2024, 1, 1)), "January 1st, 2024");
        assert_eq!(long_date(date(2024, 3, 2)), "March 2nd, 2024");
        assert_eq!(long_date(date(2024, 5, 3)), "May 3rd, 2024");
        assert_eq!(long_date(date(2024, 7, 11)), "July 11th, 2024");
        assert_eq!(long_date(date(2024, 7, 12)), "July 12th, 2024");
        assert_eq!(long_date(date(2024, 7, 13)), "July 13th, 2024");
        assert_eq!(long_date(date(2024, 8, 21)), "August 21st, 2024");
        assert_eq!(long_date(date(2024, 8, 22)), "August 22nd, 2024");
        assert_eq!(long_date(date(2024, 8, 30)), "August 30th, 2024");
    }

    #[test]
    fn test_journal_text() {
        let mut first = JournalEntry::new("Slept well");
        first.set_mood(8);
        first.add_tag("joy");
        first.add_tag("growth");
        let second = JournalEntry::new("Hard day");

        let text = journal_text(&[first, second]);
        let blocks: Vec<&str> = text.split("---\n").collect();

        // two entries plus the empty tail after the last separator
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].contains("\nMood: 8/10\nTags: joy, growth\n\nSlept well\n\n"));
        assert!(blocks[1].starts_with('\n'));
        assert!(blocks[1].contains("Mood: 5/10\nTags: \n\nHard day\n\n"));
        assert!(text.ends_with("---\n"));
    }

    #[test]
    fn test_journal_text_empty() {
        assert_eq!(journal_text(&[]), "");
    }

    #[test]
    fn test_legacy_text() {
        let item = LegacyItem::new(LegacyKind::Letter, "To my daughter", "Be brave.");
        let text = legacy_text(&item);
        assert!(text.starts_with("To my daughter\nCreated: "));
        assert!(text.ends_with("---\n\nBe brave.\n"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Forgiveness Letter to  Dad"), "forgiveness-letter-to-dad");
        assert_eq!(slugify("Food bank"), "food-bank");
        assert_eq!(slugify("Letter to Mom/Dad"), "letter-to-mom-dad");
        assert_eq!(slugify("/tmp/Escape"), "tmp-escape");
        assert_eq!(slugify(".."), "untitled");
        assert_eq!(slugify("  "), "untitled");
    }

    #[test]
    fn test_titled_exports_stay_in_export_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("exports");

        for title in ["a/b", "/abs", "..", "../../outside"] {
            let path = write_export(&dir, &slugify(title), "txt", "x").unwrap();
            assert_eq!(path.parent(), Some(dir.as_path()), "title {:?}", title);
            assert!(path.exists());
        }
    }

    #[test]
    fn test_write_export_rejects_path_stems() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("exports");

        for stem in ["a/b", "/abs", "..", ".hidden", ""] {
            assert!(write_export(&dir, stem, "txt", "x").is_err(), "stem {:?}", stem);
        }
        assert!(!dir.exists());
    }

    #[test]
    fn test_write_export() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("exports");

        let path = write_export(&dir, "journal-export", "txt", "hello").unwrap();
        assert_eq!(path, dir.join("journal-export.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }
}
