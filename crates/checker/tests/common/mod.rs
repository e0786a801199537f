#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use courtwatch_checker::{NotificationKind, Notifier, SlotGroup};
use courtwatch_core::{ChatId, Slot, Subscription};
use courtwatch_db::{MemoryStore, SnapshotStore};
use courtwatch_parser::{FetchError, RawDocument, ScheduleSource};
use mockall::mock;

pub const ORIGIN: &str = "https://kluby.org";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    date.and_time(hm(h, m))
}

/// Sunday noon; the next Monday is 2026-10-19.
pub fn sunday_noon() -> NaiveDateTime {
    at(date(2026, 10, 18), 12, 0)
}

pub fn next_monday() -> NaiveDate {
    date(2026, 10, 19)
}

pub fn subscription(chat_id: ChatId, resources: &[&str], weekdays: &[Weekday]) -> Subscription {
    Subscription {
        chat_id,
        districts: vec!["Wola".to_string()],
        resources: resources.iter().map(|r| r.to_string()).collect(),
        weekdays: weekdays.to_vec(),
        time_from: Some(hm(8, 0)),
        time_to: Some(hm(10, 0)),
    }
}

/// A schedule page with one indoor court bookable at `times`.
pub fn schedule_page(club: &str, times: &[&str]) -> String {
    let rows: String = times
        .iter()
        .map(|time| {
            format!(
                r#"<tr><td>{time}</td><td><a href="/club/rezerwuj/{time}">Rezerwuj</a></td></tr>"#
            )
        })
        .collect();

    format!(
        r#"<html><head><title>{club} - Rezerwacje ONLINE</title></head><body>
        <table id="grafik"><thead><tr><th>Godzina</th><th>Hala 1 Hala tenis</th></tr></thead>
        <tbody>{rows}</tbody></table></body></html>"#
    )
}

#[derive(Debug, Clone)]
pub enum Page {
    Html(String),
    LoginWall,
    Failure(u16),
}

/// Serves canned pages; unknown (resource, date) pairs get an empty document.
#[derive(Debug, Default)]
pub struct FakeSource {
    pages: Mutex<HashMap<(String, NaiveDate), Page>>,
    calls: Mutex<Vec<(String, NaiveDate)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, resource_id: &str, date: NaiveDate, page: Page) {
        self.pages
            .lock()
            .unwrap()
            .insert((resource_id.to_string(), date), page);
    }

    pub fn calls(&self) -> Vec<(String, NaiveDate)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScheduleSource for FakeSource {
    fn origin(&self) -> &str {
        ORIGIN
    }

    async fn fetch_schedule_document(
        &self,
        resource_id: &str,
        date: NaiveDate,
    ) -> Result<RawDocument, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((resource_id.to_string(), date));

        let page = self
            .pages
            .lock()
            .unwrap()
            .get(&(resource_id.to_string(), date))
            .cloned();

        match page {
            Some(Page::Html(html)) => Ok(RawDocument::Schedule(html)),
            Some(Page::LoginWall) => Ok(RawDocument::LoginRequired),
            Some(Page::Failure(status)) => Err(FetchError::Status {
                status,
                url: format!("{ORIGIN}/{resource_id}/grafik"),
            }),
            None => Ok(RawDocument::Schedule(String::new())),
        }
    }
}

/// Records every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<(ChatId, NotificationKind, Vec<SlotGroup>)>>,
}

impl RecordingNotifier {
    pub fn calls(&self) -> Vec<(ChatId, NotificationKind, Vec<SlotGroup>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        chat_id: ChatId,
        kind: NotificationKind,
        groups: &[SlotGroup],
    ) -> eyre::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((chat_id, kind, groups.to_vec()));
        Ok(())
    }
}

mock! {
    pub ChatNotifier {}

    #[async_trait]
    impl Notifier for ChatNotifier {
        async fn notify(
            &self,
            chat_id: ChatId,
            kind: NotificationKind,
            groups: &[SlotGroup],
        ) -> eyre::Result<()>;
    }
}

/// Memory-backed snapshots that count writes.
#[derive(Debug, Default)]
pub struct CountingSnapshots {
    inner: MemoryStore,
    saves: AtomicUsize,
}

impl CountingSnapshots {
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotStore for CountingSnapshots {
    async fn get_snapshot(&self, chat_id: ChatId) -> eyre::Result<Option<Vec<Slot>>> {
        self.inner.get_snapshot(chat_id).await
    }

    async fn save_snapshot(&self, chat_id: ChatId, slots: &[Slot]) -> eyre::Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_snapshot(chat_id, slots).await
    }
}

/// `HH:MM` start times of `slots`, in order.
pub fn times(slots: &[Slot]) -> Vec<String> {
    slots
        .iter()
        .map(|slot| slot.time.format("%H:%M").to_string())
        .collect()
}
