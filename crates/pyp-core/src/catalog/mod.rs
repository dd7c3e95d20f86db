//! Content catalog
//!
//! Static, read-only reference data shipped with the application:
//! the 12 monthly modules and the quote list.

pub mod modules;
pub mod quotes;

use chrono::{Datelike, NaiveDate};

pub use modules::{module, modules, Assets, Module, WeeklyUnit, MODULES};
pub use quotes::{
    daily_quote, quote_of_the_day, quotes, quotes_by_theme, random_quote, Quote, QUOTES,
};

/// The module whose month matches a calendar date
pub fn current_module(date: NaiveDate) -> &'static Module {
    &MODULES[date.month0() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_module_follows_calendar_month() {
        let march = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(current_module(march).theme, "Letting Go");

        let december = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(current_module(december).month, 12);
    }
}
