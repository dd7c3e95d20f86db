//! Quote command handlers

use anyhow::Result;

use pyp_core::catalog::{quote_of_the_day, quotes_by_theme, random_quote};

use crate::output::{Output, OutputFormat};

/// Today's quote
pub fn today(output: &Output) -> Result<()> {
    output.print_quote(quote_of_the_day())
}

/// A random quote
pub fn random(output: &Output) -> Result<()> {
    output.print_quote(random_quote())
}

/// Every quote on a theme
pub fn theme(theme: String, output: &Output) -> Result<()> {
    let quotes = quotes_by_theme(&theme);

    if output.format == OutputFormat::Json {
        return output.print_json(&quotes);
    }
    if quotes.is_empty() {
        output.message(&format!("No quotes on '{}'.", theme));
        return Ok(());
    }
    for (i, quote) in quotes.iter().enumerate() {
        if i > 0 {
            println!();
        }
        output.print_quote(quote)?;
    }
    Ok(())
}
