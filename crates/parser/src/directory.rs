//! Resource directory pages: the city's district list and the clubs listed
//! on each district page.

use std::collections::HashSet;
use std::sync::LazyLock;

use courtwatch_core::Resource;
use scraper::{ElementRef, Html, Selector};

use crate::grid::{element_text, selector};

/// Path of the city listing; district pages live below it.
pub const CITY_PATH: &str = "/tenis/kluby/warszawa";

const CITY_NAME: &str = "Warszawa";
const RESERVE_BADGE: &str = "REZERWUJ";
const MAX_DISTANCE_KM: f64 = 50.0;
const SPORT_PATHS: [&str; 7] = [
    "/tenis/",
    "/padel/",
    "/squash/",
    "/badminton/",
    "/pickleball/",
    "/golf/",
    "/bilard/",
];

static DISTRICT_LINK: LazyLock<Selector> =
    LazyLock::new(|| selector("a[href*='/tenis/kluby/warszawa/']"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static SPORT_HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h3"));
static CLUB_HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h4"));
static BADGE: LazyLock<Selector> = LazyLock::new(|| selector("span"));
static ADDRESS: LazyLock<Selector> = LazyLock::new(|| selector("p"));

/// District names linked from the city page, in page order.
pub fn parse_districts(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();

    document
        .select(&DISTRICT_LINK)
        .map(element_text)
        .filter(|name| !name.is_empty() && name != CITY_NAME)
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// URL slug of a district name ("Praga-Południe" becomes "praga-poludnie").
pub fn district_slug(district: &str) -> String {
    district
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'ą' => 'a',
            'ć' => 'c',
            'ę' => 'e',
            'ł' => 'l',
            'ń' => 'n',
            'ó' => 'o',
            'ś' => 's',
            'ź' | 'ż' => 'z',
            ' ' | '–' | '—' => '-',
            other => other,
        })
        .collect()
}

/// Clubs listed on a district page.
///
/// Club cards are single-segment links carrying an `h4` name and a
/// "REZERWUJ" badge. Sport category cards (`h3`), navigation, events with a
/// date in the name and clubs implausibly far away are skipped.
pub fn parse_district_resources(html: &str, district: &str) -> Vec<Resource> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut resources = Vec::new();

    for link in document.select(&LINK) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !is_club_href(href) {
            continue;
        }
        let Some(name) = club_card_name(link) else {
            continue;
        };

        let id = href
            .split('?')
            .next()
            .unwrap_or_default()
            .trim_start_matches('/')
            .to_string();
        if id.is_empty() || !seen.insert(id.clone()) {
            continue;
        }

        resources.push(Resource {
            id,
            name,
            district: district.to_string(),
        });
    }

    resources
}

fn is_club_href(href: &str) -> bool {
    if href.is_empty()
        || href == "/"
        || href.starts_with("http")
        || href.starts_with("//")
        || href.contains("regulamin")
        || href.contains("static")
        || href.contains("/kluby/")
    {
        return false;
    }
    if SPORT_PATHS.iter().any(|path| href.contains(path)) {
        return false;
    }

    !href.trim_start_matches('/').contains('/')
}

fn club_card_name(card: ElementRef<'_>) -> Option<String> {
    if card.select(&SPORT_HEADING).next().is_some() {
        return None;
    }

    let name = element_text(card.select(&CLUB_HEADING).next()?);
    if name.chars().count() <= 4 || name.contains("(202") {
        return None;
    }

    let badge = card.select(&BADGE).next().map(element_text)?;
    if badge != RESERVE_BADGE {
        return None;
    }

    let address = card.select(&ADDRESS).next().map(element_text).unwrap_or_default();
    if distance_km(&address).is_some_and(|km| km > MAX_DISTANCE_KM) {
        return None;
    }

    Some(name)
}

/// Distance in an address suffix such as "ul. Polna 1 (3,4 km)".
pub fn distance_km(address: &str) -> Option<f64> {
    let (before, _) = address.split_once(" km)")?;
    let (_, number) = before.rsplit_once('(')?;
    number.trim().replace(',', ".").parse().ok()
}
