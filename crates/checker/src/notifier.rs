use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use courtwatch_core::{ChatId, Slot, models::clock::format_hhmm};
use eyre::Result;
use tracing::info;

/// Why a notification is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Full current availability, after an on-demand check.
    Current,
    /// Slots that appeared since the last committed snapshot.
    New,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotEntry {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub court_label: String,
}

/// Slots of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGroup {
    pub resource_id: String,
    pub resource_name: String,
    pub entries: Vec<SlotEntry>,
}

/// Groups slots by resource, keeping groups and entries in first-seen order.
pub fn group_by_resource(slots: &[Slot]) -> Vec<SlotGroup> {
    let mut groups: Vec<SlotGroup> = Vec::new();

    for slot in slots {
        let entry = SlotEntry {
            date: slot.date,
            time: slot.time,
            court_label: slot.court_label.clone(),
        };

        match groups
            .iter_mut()
            .find(|group| group.resource_id == slot.resource_id)
        {
            Some(group) => group.entries.push(entry),
            None => groups.push(SlotGroup {
                resource_id: slot.resource_id.clone(),
                resource_name: slot.resource_name.clone(),
                entries: vec![entry],
            }),
        }
    }

    groups
}

/// Delivers slot groups to a chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, chat_id: ChatId, kind: NotificationKind, groups: &[SlotGroup])
    -> Result<()>;
}

/// Writes notifications to the log instead of a chat.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(
        &self,
        chat_id: ChatId,
        kind: NotificationKind,
        groups: &[SlotGroup],
    ) -> Result<()> {
        for group in groups {
            for entry in &group.entries {
                info!(
                    chat_id,
                    ?kind,
                    club = %group.resource_name,
                    "{} {} - {}",
                    entry.date.format("%Y-%m-%d"),
                    format_hhmm(entry.time),
                    entry.court_label
                );
            }
        }

        let total: usize = groups.iter().map(|group| group.entries.len()).sum();
        info!(chat_id, ?kind, "Notification sent ({} slots)", total);
        Ok(())
    }
}
