//! # Grid Extractor
//!
//! Rebuilds the logical (time row × court column) matrix of one schedule
//! table. The booking site merges cells vertically with `rowspan`, so a row
//! below a merged cell has fewer physical `<td>` elements than logical
//! columns. Each physical cell is assigned to the first logical column not
//! still claimed by a merge from an earlier row.
//!
//! Column 0 is always the time label column and is never reported.

use std::sync::LazyLock;

use chrono::NaiveTime;
use courtwatch_core::{TimeWindow, models::clock::parse_hhmm};
use scraper::{ElementRef, Selector};

/// Header substrings marking open-air courts, which are never reported.
pub const OPEN_AIR_MARKERS: [&str; 4] = ["otwarte", "odkryte", "odkryt", "otwart"];

const RESERVED_MARKER: &str = "zarezerwowane";
const RESERVE_MARKER: &str = "rezerwuj";

static HEADER_ROW: LazyLock<Selector> = LazyLock::new(|| selector("thead tr"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static RESERVE_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href*='rezerwuj']"));

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hard-coded selector must parse")
}

/// Whitespace-collapsed text content of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// What a logical cell offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellState {
    /// Explicitly marked as reserved.
    Reserved,
    /// No usable reservation link.
    Unavailable,
    /// Bookable; `link` is the raw href of the reservation link.
    Bookable { link: String },
}

impl CellState {
    pub fn is_bookable(&self) -> bool {
        matches!(self, CellState::Bookable { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub column: usize,
    pub state: CellState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub time: NaiveTime,
    pub cells: Vec<GridCell>,
}

impl GridRow {
    pub fn cell(&self, column: usize) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.column == column)
    }
}

/// A bookable cell inside the requested window, ready for normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
    pub time: NaiveTime,
    pub column: usize,
    pub link: String,
}

/// Remaining rows each logical column stays claimed by a merged cell.
///
/// Scoped to a single table walk.
#[derive(Debug)]
struct OccupancyTracker {
    remaining: Vec<usize>,
}

impl OccupancyTracker {
    fn new(width: usize) -> Self {
        Self {
            remaining: vec![0; width],
        }
    }

    /// Enters the next physical row: reports which columns it inherits from
    /// merges above and consumes one row of each of those merges.
    fn advance_row(&mut self) -> Vec<bool> {
        self.remaining
            .iter_mut()
            .map(|remaining| {
                let occupied = *remaining > 0;
                if occupied {
                    *remaining -= 1;
                }
                occupied
            })
            .collect()
    }

    /// Records a cell spanning `span` rows starting at the current one.
    fn claim(&mut self, column: usize, span: usize) {
        if span > 1 {
            if let Some(remaining) = self.remaining.get_mut(column) {
                *remaining = span - 1;
            }
        }
    }
}

/// Logical matrix of one schedule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleGrid {
    pub headers: Vec<String>,
    pub rows: Vec<GridRow>,
}

impl ScheduleGrid {
    pub fn from_table(table: ElementRef<'_>) -> Self {
        let headers = header_labels(table);
        let width = headers.len();
        let mut tracker = OccupancyTracker::new(width);
        let mut rows = Vec::new();

        for tr in table.select(&ROW) {
            // Every physical row consumes merges, including rows we reject.
            let occupied = tracker.advance_row();
            let cells = data_cells(tr);

            let Some(time) = cells
                .first()
                .and_then(|td| normalize_time_label(&element_text(*td)))
            else {
                continue;
            };

            let mut row = GridRow {
                time,
                cells: Vec::new(),
            };
            let mut column = 0;

            for td in cells {
                while column < width && occupied[column] {
                    column += 1;
                }
                if column >= width {
                    break;
                }
                if column == 0 {
                    column += 1;
                    continue;
                }

                if let Some(span) = row_span(td) {
                    tracker.claim(column, span);
                }
                row.cells.push(GridCell {
                    column,
                    state: classify(td),
                });
                column += 1;
            }

            rows.push(row);
        }

        Self { headers, rows }
    }

    pub fn header(&self, column: usize) -> Option<&str> {
        self.headers.get(column).map(String::as_str)
    }

    /// Bookable cells inside `window`, excluding open-air columns.
    pub fn available_cells(&self, window: &TimeWindow) -> Vec<RawCell> {
        self.rows
            .iter()
            .filter(|row| window.contains(row.time))
            .flat_map(|row| {
                row.cells.iter().filter_map(move |cell| match &cell.state {
                    CellState::Bookable { link } => Some(RawCell {
                        time: row.time,
                        column: cell.column,
                        link: link.clone(),
                    }),
                    _ => None,
                })
            })
            .filter(|cell| !self.header(cell.column).is_some_and(is_open_air))
            .collect()
    }
}

fn header_labels(table: ElementRef<'_>) -> Vec<String> {
    let Some(header_row) = table.select(&HEADER_ROW).next() else {
        return Vec::new();
    };

    header_row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "th")
        .map(element_text)
        .collect()
}

fn data_cells(tr: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect()
}

fn row_span(td: ElementRef<'_>) -> Option<usize> {
    td.value().attr("rowspan")?.trim().parse().ok()
}

fn classify(td: ElementRef<'_>) -> CellState {
    if element_text(td).to_lowercase().contains(RESERVED_MARKER) {
        return CellState::Reserved;
    }

    let Some(link) = td.select(&RESERVE_LINK).next() else {
        return CellState::Unavailable;
    };
    if !element_text(link).to_lowercase().contains(RESERVE_MARKER) {
        return CellState::Unavailable;
    }

    match link.value().attr("href") {
        Some(href) => CellState::Bookable {
            link: href.to_string(),
        },
        None => CellState::Unavailable,
    }
}

/// Whether a column header names an open-air court.
pub fn is_open_air(header: &str) -> bool {
    let header = header.to_lowercase();
    OPEN_AIR_MARKERS.iter().any(|marker| header.contains(marker))
}

/// Reads the first `H:MM` clock reading of a row label, zero-padded.
///
/// Labels without a `:` separator are not time rows.
pub fn normalize_time_label(label: &str) -> Option<NaiveTime> {
    let (before, after) = label.split_once(':')?;

    let hour: String = before
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    let minute: String = after.chars().take_while(char::is_ascii_digit).collect();

    if hour.is_empty() || hour.len() > 2 || minute.is_empty() || minute.len() > 2 {
        return None;
    }

    parse_hhmm(&format!("{hour:0>2}:{minute:0>2}"))
}
