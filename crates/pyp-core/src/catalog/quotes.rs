//! Inspirational quotes

use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;
use serde::Serialize;

/// A quote tagged by theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
    pub theme: &'static str,
}

const fn quote(text: &'static str, author: &'static str, theme: &'static str) -> Quote {
    Quote {
        text,
        author,
        theme,
    }
}

pub static QUOTES: [Quote; 20] = [
    quote("The trouble is, you think you have time.", "Buddha", "mortality"),
    quote("What we leave behind is not what is engraved in stone monuments, but what is woven into the lives of others.", "Pericles", "legacy"),
    quote("Yesterday is history, tomorrow is a mystery, today is a gift, which is why we call it the present.", "Bill Keane", "presence"),
    quote("In the end, we only regret the chances we didn't take, the relationships we were afraid to have, and the decisions we waited too long to make.", "Lewis Carroll", "courage"),
    quote("Forgiveness is not about forgetting. It is about letting go of another person's throat.", "William Paul Young", "forgiveness"),
    quote("Gratitude makes sense of our past, brings peace for today, and creates a vision for tomorrow.", "Melody Beattie", "gratitude"),
    quote("The fear of death follows from the fear of life. One who lives fully is prepared to die at any time.", "Mark Twain", "acceptance"),
    quote("We are not going in circles, we are going upwards. The path is a spiral; we have already climbed many steps.", "Hermann Hesse", "growth"),
    quote("Your task is not to seek for love, but merely to seek and find all the barriers within yourself that you have built against it.", "Rumi", "relationships"),
    quote("The meaning of life is to find your gift. The purpose of life is to give it away.", "Pablo Picasso", "service"),
    quote("Life is not measured by the number of breaths we take, but by the moments that take our breath away.", "Maya Angelou", "presence"),
    quote("The best time to plant a tree was 20 years ago. The second best time is now.", "Chinese Proverb", "action"),
    quote("What lies behind us and what lies before us are tiny matters compared to what lies within us.", "Ralph Waldo Emerson", "inner strength"),
    quote("Death is not the opposite of life, but a part of it.", "Haruki Murakami", "mortality"),
    quote("The only way to make sense out of change is to plunge into it, move with it, and join the dance.", "Alan Watts", "acceptance"),
    quote("Be yourself; everyone else is already taken.", "Oscar Wilde", "authenticity"),
    quote("The cave you fear to enter holds the treasure you seek.", "Joseph Campbell", "courage"),
    quote("We do not remember days, we remember moments.", "Cesare Pavese", "presence"),
    quote("The privilege of a lifetime is to become who you truly are.", "Carl Jung", "growth"),
    quote("Let yourself be silently drawn by the strange pull of what you really love. It will not lead you astray.", "Rumi", "purpose"),
];

/// All quotes
pub fn quotes() -> &'static [Quote] {
    &QUOTES
}

/// The quote for a calendar day
///
/// Picks `day_of_year % len`, with January 1st as day 1, so the choice is
/// stable for the whole day.
pub fn daily_quote(date: NaiveDate) -> &'static Quote {
    &QUOTES[date.ordinal() as usize % QUOTES.len()]
}

/// The quote for today's local date
pub fn quote_of_the_day() -> &'static Quote {
    daily_quote(Local::now().date_naive())
}

/// A uniformly random quote
pub fn random_quote() -> &'static Quote {
    let index = rand::thread_rng().gen_range(0..QUOTES.len());
    &QUOTES[index]
}

/// Quotes for a theme, compared case-insensitively
pub fn quotes_by_theme(theme: &str) -> Vec<&'static Quote> {
    QUOTES
        .iter()
        .filter(|q| q.theme.eq_ignore_ascii_case(theme.trim()))
        .collect()
}
