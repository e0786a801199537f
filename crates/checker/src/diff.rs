//! # Availability Diff Engine
//!
//! A slot is new when its fingerprint is missing from the subscription's
//! last committed snapshot. Without a snapshot every slot is new.
//! Persisting the snapshot is left to the caller.

use std::collections::HashSet;
use std::sync::Arc;

use courtwatch_core::{ChatId, Slot};
use courtwatch_db::SnapshotStore;
use tracing::warn;

/// Slots of `current` whose fingerprint is not in `previous`, in order.
pub fn new_slots(previous: Option<&[Slot]>, current: &[Slot]) -> Vec<Slot> {
    let Some(previous) = previous else {
        return current.to_vec();
    };

    let known: HashSet<_> = previous.iter().map(Slot::fingerprint).collect();
    current
        .iter()
        .filter(|slot| !known.contains(&slot.fingerprint()))
        .cloned()
        .collect()
}

pub struct DiffEngine {
    snapshots: Arc<dyn SnapshotStore>,
}

impl DiffEngine {
    pub fn new(snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self { snapshots }
    }

    /// New slots of `current` relative to the stored snapshot of `chat_id`.
    ///
    /// An unreadable snapshot counts as no snapshot.
    pub async fn diff(&self, chat_id: ChatId, current: &[Slot]) -> Vec<Slot> {
        let previous = match self.snapshots.get_snapshot(chat_id).await {
            Ok(previous) => previous,
            Err(e) => {
                warn!(chat_id, "Error loading last slots: {e:#}");
                None
            }
        };

        new_slots(previous.as_deref(), current)
    }
}
