use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use courtwatch_core::{Slot, TimeWindow};
use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::grid::{ScheduleGrid, selector};
use crate::normalize::{SlotContext, build_slot, club_name};

/// Phrases the site shows instead of the schedule to anonymous visitors.
pub const LOGIN_WALL_MARKERS: [&str; 3] = [
    "Grafik widoczny po zalogowaniu",
    "widoczny po zalogowaniu",
    "Musisz się zalogować",
];

static SCHEDULE_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table#grafik"));

/// One resource+date schedule request.
#[derive(Debug, Clone)]
pub struct ScheduleRequest<'a> {
    pub resource_id: &'a str,
    pub date: NaiveDate,
    pub window: TimeWindow,
    pub origin: &'a str,
}

pub fn requires_login(body: &str) -> bool {
    LOGIN_WALL_MARKERS.iter().any(|marker| body.contains(marker))
}

/// Extracts the bookable slots of one schedule document.
///
/// Missing tables, empty tables and login walls all yield an empty list.
/// Slots are unique by fingerprint; the first occurrence wins.
pub fn parse_schedule(html: &str, request: &ScheduleRequest<'_>) -> Vec<Slot> {
    if requires_login(html) {
        info!(
            resource_id = request.resource_id,
            "Schedule is visible only after login, skipping"
        );
        return Vec::new();
    }

    let document = Html::parse_document(html);
    let club = club_name(&document, request.resource_id);
    let context = SlotContext {
        resource_id: request.resource_id,
        club_name: &club,
        date: request.date,
        origin: request.origin,
    };

    let mut seen = HashSet::new();
    let mut slots = Vec::new();
    let mut tables = 0;

    for table in document.select(&SCHEDULE_TABLE) {
        tables += 1;
        let grid = ScheduleGrid::from_table(table);

        for cell in grid.available_cells(&request.window) {
            let header = grid.header(cell.column).unwrap_or_default();
            let slot = build_slot(&context, header, &cell);
            if seen.insert(slot.fingerprint()) {
                slots.push(slot);
            }
        }
    }

    if tables == 0 {
        debug!(
            resource_id = request.resource_id,
            date = %request.date,
            "No schedule table in document"
        );
    }

    debug!(
        resource_id = request.resource_id,
        club = %club,
        date = %request.date,
        window = %request.window,
        "Found {} available slots",
        slots.len()
    );

    slots
}
