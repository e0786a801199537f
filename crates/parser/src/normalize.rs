//! # Slot Normalizer
//!
//! Turns a [`RawCell`] plus document metadata into a canonical [`Slot`].

use std::sync::LazyLock;

use chrono::NaiveDate;
use courtwatch_core::{
    Slot,
    models::slot::{DEFAULT_DURATION_UNITS, PRICE_PLACEHOLDER},
};
use scraper::{Html, Selector};

use crate::grid::{RawCell, element_text, selector};

/// Site brand; headings containing it are never a club name.
pub const BRAND_TOKEN: &str = "kluby.org";

const GENERIC_HEADING_MARKER: &str = "grafik";
const COURT_WORDS: [&str; 2] = ["Hala", "Kort"];

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static HEADINGS: LazyLock<Selector> = LazyLock::new(|| selector("h1, h2, h3"));

/// Metadata shared by every slot of one schedule document.
#[derive(Debug, Clone)]
pub struct SlotContext<'a> {
    pub resource_id: &'a str,
    pub club_name: &'a str,
    pub date: NaiveDate,
    /// Site origin used to absolutize relative booking links.
    pub origin: &'a str,
}

/// Resolves the club's display name.
///
/// Tries the `<title>` ("Club - Rezerwacje ONLINE | Kluby.org"), then the
/// first heading that is not generic, then falls back to the resource id.
pub fn club_name(document: &Html, resource_id: &str) -> String {
    let from_title = document
        .select(&TITLE)
        .map(element_text)
        .filter_map(|title| {
            title
                .split_once(" - ")
                .map(|(name, _)| name.trim().to_string())
        })
        .find(|name| !name.is_empty());

    if let Some(name) = from_title {
        return name;
    }

    document
        .select(&HEADINGS)
        .map(element_text)
        .find(|text| {
            let lower = text.to_lowercase();
            text.chars().count() > 3
                && !lower.contains(GENERIC_HEADING_MARKER)
                && !lower.contains(BRAND_TOKEN)
        })
        .unwrap_or_else(|| resource_id.to_string())
}

/// Shortens a column header to its court designation.
///
/// "Hala 1 Hala tenis" becomes "Hala 1", "Kort 3 ziemny otwart" becomes
/// "Kort 3"; other headers keep their first two words.
pub fn clean_court_label(header: &str) -> String {
    let words: Vec<&str> = header.split_whitespace().collect();

    if let Some(pair) = words
        .windows(2)
        .find(|pair| COURT_WORDS.contains(&pair[0]))
    {
        return format!("{} {}", pair[0], pair[1]);
    }

    match words.as_slice() {
        [first, second, ..] => format!("{first} {second}"),
        _ => header.to_string(),
    }
}

/// Absolute booking URL for a reservation link.
pub fn booking_url(origin: &str, link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        return link.to_string();
    }

    let origin = origin.trim_end_matches('/');
    if link.starts_with('/') {
        format!("{origin}{link}")
    } else {
        format!("{origin}/{link}")
    }
}

pub fn build_slot(context: &SlotContext<'_>, header: &str, cell: &RawCell) -> Slot {
    Slot {
        resource_id: context.resource_id.to_string(),
        resource_name: context.club_name.to_string(),
        court_label: clean_court_label(header),
        court_type_key: header.to_string(),
        date: context.date,
        time: cell.time,
        duration_units: DEFAULT_DURATION_UNITS,
        price: PRICE_PLACEHOLDER.to_string(),
        booking_url: booking_url(context.origin, &cell.link),
    }
}
