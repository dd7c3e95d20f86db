//! Command handlers
//!
//! One module per top-level subcommand. Handlers take the store, their
//! arguments and the output helper.

pub mod config;
pub mod dashboard;
pub mod journal;
pub mod legacy;
pub mod meeting;
pub mod module;
pub mod onboard;
pub mod quote;
pub mod service;
pub mod state;

use anyhow::Result;
use clap::ValueEnum;

use pyp_core::export::pdf;

/// File format for journal and legacy exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Plain text
    #[default]
    Txt,
    /// Paginated A4 document
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// File contents for an export of `text`
    pub fn render(self, title: &str, text: &str) -> Result<Vec<u8>> {
        match self {
            ExportFormat::Txt => Ok(text.as_bytes().to_vec()),
            ExportFormat::Pdf => pdf::render(title, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_render() {
        let text = ExportFormat::Txt.render("Journal", "hello").unwrap();
        assert_eq!(text, b"hello");

        let document = ExportFormat::Pdf.render("Journal", "hello").unwrap();
        assert!(document.starts_with(b"%PDF"));
        assert_eq!(ExportFormat::Pdf.extension(), "pdf");
    }
}
