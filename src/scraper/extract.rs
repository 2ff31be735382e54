use chrono::NaiveDate;
use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::browser::CardSnapshot;
use crate::config;
use crate::models::WorkoutRecord;

static PROGRAM_TITLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(config::PROGRAM_TITLE_SELECTOR).expect("valid program title selector")
});

/// Turn a day's fully revealed cards into records, in on-page order.
///
/// Social-chatter cards are dropped entirely. Everything else becomes a
/// record; a missing or empty program title degrades to the sentinel
/// rather than failing the card. Pure read, no page interaction.
pub fn records_from_cards(day: NaiveDate, cards: &[CardSnapshot]) -> Vec<WorkoutRecord> {
    cards
        .iter()
        .filter(|card| !card.text.contains(config::NON_WORKOUT_MARKER))
        .map(|card| WorkoutRecord {
            date: day,
            program: program_label(&card.html),
            details: card.text.trim().to_string(),
        })
        .collect()
}

fn program_label(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .select(&PROGRAM_TITLE)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| config::UNKNOWN_PROGRAM.to_string())
}

/// Collapse runs of whitespace and decode HTML entities.
pub fn clean_text(text: &str) -> String {
    decode_html_entities(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
