//! Gallery working copy
//!
//! Holds the images on screen, the order the server last acknowledged and
//! the state of order persistence. Reorders are applied locally first; at
//! most one persistence call is in flight and later reorders are sent once
//! it is answered. A rejected call rolls the screen back to the last
//! acknowledged order and keeps the attempted order for a retry. A call
//! overtaken by a fresh server list still blocks the next one until its
//! answer arrives, but that answer changes nothing.

use std::mem;

use derive_more::{AsRef, Display, From};
use serde::{Deserialize, Serialize};

use super::reorder::move_item;

/// Reference to a stored image (its URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, AsRef)]
#[serde(transparent)]
#[as_ref(str)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(url: &str) -> Self {
        ImageRef(url.to_string())
    }
}

/// Identifies one order persistence call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct MutationId(u64);

/// Order to send to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderUpdate {
    pub id: MutationId,
    pub images: Vec<ImageRef>,
}

/// Persistence state of the displayed order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncStatus {
    /// Screen matches the acknowledged order
    #[default]
    Synced,
    /// A local order is waiting for the server
    Pending,
    /// The server rejected an order; the screen was rolled back
    Failed {
        attempted: Vec<ImageRef>,
        message: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    images: Vec<ImageRef>,
    confirmed: Vec<ImageRef>,
    status: SyncStatus,
    in_flight: Option<OrderUpdate>,
    /// The call in flight predates the current server list
    superseded: bool,
    next_id: u64,
    uploading: bool,
}

impl Gallery {
    pub fn new(images: Vec<ImageRef>) -> Self {
        Gallery {
            confirmed: images.clone(),
            images,
            ..Default::default()
        }
    }

    /// Images in display order
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    /// Order last acknowledged by the server
    pub fn confirmed(&self) -> &[ImageRef] {
        &self.confirmed
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn in_flight(&self) -> Option<MutationId> {
        self.in_flight.as_ref().map(|update| update.id)
    }

    /// Take a list straight from the server (initial fetch, upload response).
    ///
    /// An outstanding order call keeps its slot, but its answer is ignored.
    pub fn replace(&mut self, images: Vec<ImageRef>) {
        self.confirmed = images.clone();
        self.images = images;
        self.status = SyncStatus::Synced;
        self.superseded = self.in_flight.is_some();
    }

    /// Apply a reorder on screen.
    ///
    /// Returns the update to send now, or `None` when nothing moved or a
    /// previous update is still in flight (the newest order follows on
    /// acknowledgement).
    pub fn reorder(&mut self, from: usize, to: usize) -> Option<OrderUpdate> {
        if !move_item(&mut self.images, from, to) {
            return None;
        }
        self.status = SyncStatus::Pending;
        if self.in_flight.is_some() {
            return None;
        }
        Some(self.dispatch())
    }

    /// The server stored the order sent as `id`.
    ///
    /// Returns a follow-up update if the screen moved on in the meantime.
    pub fn acknowledge(&mut self, id: MutationId) -> Option<OrderUpdate> {
        let sent = self.in_flight.take_if(|update| update.id == id)?;
        if !mem::take(&mut self.superseded) {
            self.confirmed = sent.images;
        }
        self.release()
    }

    /// The server refused the order sent as `id`: roll back and remember
    /// what the user wanted.
    ///
    /// A refusal of a superseded call only frees the slot; the returned
    /// update is whatever was held back behind it.
    pub fn reject(&mut self, id: MutationId, message: impl Into<String>) -> Option<OrderUpdate> {
        self.in_flight.take_if(|update| update.id == id)?;
        if mem::take(&mut self.superseded) {
            return self.release();
        }
        let attempted = mem::replace(&mut self.images, self.confirmed.clone());
        self.status = SyncStatus::Failed {
            attempted,
            message: message.into(),
        };
        None
    }

    /// Re-apply the order that failed and send it again
    pub fn retry(&mut self) -> Option<OrderUpdate> {
        if self.in_flight.is_some() {
            return None;
        }
        let SyncStatus::Failed { attempted, .. } = mem::take(&mut self.status) else {
            return None;
        };
        self.images = attempted;
        self.status = SyncStatus::Pending;
        Some(self.dispatch())
    }

    /// Drop the failure notice and keep the rolled-back order
    pub fn dismiss_failure(&mut self) {
        if matches!(self.status, SyncStatus::Failed { .. }) {
            self.status = SyncStatus::Synced;
        }
    }

    /// Claim the upload slot. Returns false if an upload is already running.
    pub fn begin_upload(&mut self) -> bool {
        if self.uploading {
            return false;
        }
        self.uploading = true;
        true
    }

    /// Release the upload slot, taking the server's list if the upload succeeded
    pub fn finish_upload(&mut self, images: Option<Vec<ImageRef>>) {
        self.uploading = false;
        if let Some(images) = images {
            self.replace(images);
        }
    }

    /// The slot is free: send what piled up, or settle
    fn release(&mut self) -> Option<OrderUpdate> {
        if self.images != self.confirmed {
            return Some(self.dispatch());
        }
        if self.status == SyncStatus::Pending {
            self.status = SyncStatus::Synced;
        }
        None
    }

    fn dispatch(&mut self) -> OrderUpdate {
        let update = OrderUpdate {
            id: MutationId(self.next_id),
            images: self.images.clone(),
        };
        self.next_id += 1;
        self.in_flight = Some(update.clone());
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[&str]) -> Vec<ImageRef> {
        names.iter().map(|n| ImageRef::from(*n)).collect()
    }

    #[test]
    fn test_reorder_is_optimistic() {
        let mut gallery = Gallery::new(refs(&["A", "B", "C"]));

        let update = gallery.reorder(0, 2).unwrap();
        assert_eq!(gallery.images(), refs(&["B", "C", "A"]).as_slice());
        assert_eq!(update.images, refs(&["B", "C", "A"]));
        assert_eq!(gallery.status(), &SyncStatus::Pending);
        assert_eq!(gallery.confirmed(), refs(&["A", "B", "C"]).as_slice());
    }

    #[test]
    fn test_acknowledge_commits() {
        let mut gallery = Gallery::new(refs(&["A", "B", "C"]));
        let update = gallery.reorder(2, 0).unwrap();

        assert_eq!(gallery.acknowledge(update.id), None);
        assert_eq!(gallery.status(), &SyncStatus::Synced);
        assert_eq!(gallery.confirmed(), refs(&["C", "A", "B"]).as_slice());
        assert_eq!(gallery.in_flight(), None);
    }

    #[test]
    fn test_noop_reorder_sends_nothing() {
        let mut gallery = Gallery::new(refs(&["A", "B"]));
        assert_eq!(gallery.reorder(1, 1), None);
        assert_eq!(gallery.reorder(0, 5), None);
        assert_eq!(gallery.status(), &SyncStatus::Synced);
    }

    #[test]
    fn test_reorders_while_in_flight_are_serialized() {
        let mut gallery = Gallery::new(refs(&["A", "B", "C"]));
        let first = gallery.reorder(0, 1).unwrap();
        assert_eq!(first.images, refs(&["B", "A", "C"]));

        // Second drag is shown at once but not sent yet
        assert_eq!(gallery.reorder(2, 0), None);
        assert_eq!(gallery.images(), refs(&["C", "B", "A"]).as_slice());

        let follow_up = gallery.acknowledge(first.id).unwrap();
        assert_eq!(follow_up.images, refs(&["C", "B", "A"]));
        assert_ne!(follow_up.id, first.id);
        assert_eq!(gallery.confirmed(), refs(&["B", "A", "C"]).as_slice());
        assert_eq!(gallery.status(), &SyncStatus::Pending);

        assert_eq!(gallery.acknowledge(follow_up.id), None);
        assert_eq!(gallery.status(), &SyncStatus::Synced);
    }

    #[test]
    fn test_reject_rolls_back() {
        let mut gallery = Gallery::new(refs(&["A", "B", "C"]));
        let update = gallery.reorder(0, 2).unwrap();

        gallery.reject(update.id, "Could not save order");
        assert_eq!(gallery.images(), refs(&["A", "B", "C"]).as_slice());
        assert_eq!(
            gallery.status(),
            &SyncStatus::Failed {
                attempted: refs(&["B", "C", "A"]),
                message: "Could not save order".to_string(),
            }
        );
    }

    #[test]
    fn test_retry_resends_attempted_order() {
        let mut gallery = Gallery::new(refs(&["A", "B", "C"]));
        let update = gallery.reorder(0, 2).unwrap();
        gallery.reject(update.id, "nope");

        let retry = gallery.retry().unwrap();
        assert_eq!(retry.images, refs(&["B", "C", "A"]));
        assert_eq!(gallery.images(), refs(&["B", "C", "A"]).as_slice());
        assert_eq!(gallery.status(), &SyncStatus::Pending);

        assert_eq!(gallery.acknowledge(retry.id), None);
        assert_eq!(gallery.confirmed(), refs(&["B", "C", "A"]).as_slice());
    }

    #[test]
    fn test_retry_without_failure_is_noop() {
        let mut gallery = Gallery::new(refs(&["A", "B"]));
        assert_eq!(gallery.retry(), None);
        assert_eq!(gallery.status(), &SyncStatus::Synced);
    }

    #[test]
    fn test_dismiss_failure_keeps_rollback() {
        let mut gallery = Gallery::new(refs(&["A", "B"]));
        let update = gallery.reorder(0, 1).unwrap();
        gallery.reject(update.id, "nope");

        gallery.dismiss_failure();
        assert_eq!(gallery.status(), &SyncStatus::Synced);
        assert_eq!(gallery.images(), refs(&["A", "B"]).as_slice());
        assert_eq!(gallery.retry(), None);
    }

    #[test]
    fn test_late_answers_after_replace_are_ignored() {
        let mut gallery = Gallery::new(refs(&["A", "B"]));
        let update = gallery.reorder(0, 1).unwrap();

        gallery.replace(refs(&["A", "B", "N"]));
        assert_eq!(gallery.acknowledge(update.id), None);
        assert_eq!(gallery.reject(update.id, "late"), None);

        assert_eq!(gallery.images(), refs(&["A", "B", "N"]).as_slice());
        assert_eq!(gallery.confirmed(), refs(&["A", "B", "N"]).as_slice());
        assert_eq!(gallery.status(), &SyncStatus::Synced);
        assert_eq!(gallery.in_flight(), None);
    }

    #[test]
    fn test_superseded_call_still_blocks_next_write() {
        let mut gallery = Gallery::new(refs(&["A", "B"]));
        let first = gallery.reorder(0, 1).unwrap();
        assert_eq!(first.images, refs(&["B", "A"]));

        // Upload answer arrives while the first order is still out
        assert!(gallery.begin_upload());
        gallery.finish_upload(Some(refs(&["A", "B", "N"])));
        assert_eq!(gallery.in_flight(), Some(first.id));

        // Shown at once, sent only after the old call is answered
        assert_eq!(gallery.reorder(2, 0), None);
        assert_eq!(gallery.images(), refs(&["N", "A", "B"]).as_slice());
        assert_eq!(gallery.status(), &SyncStatus::Pending);

        let next = gallery.acknowledge(first.id).unwrap();
        assert_eq!(next.images, refs(&["N", "A", "B"]));
        assert_eq!(gallery.confirmed(), refs(&["A", "B", "N"]).as_slice());

        assert_eq!(gallery.acknowledge(next.id), None);
        assert_eq!(gallery.confirmed(), refs(&["N", "A", "B"]).as_slice());
        assert_eq!(gallery.status(), &SyncStatus::Synced);
    }

    #[test]
    fn test_superseded_rejection_does_not_roll_back() {
        let mut gallery = Gallery::new(refs(&["A", "B"]));
        let first = gallery.reorder(0, 1).unwrap();

        gallery.replace(refs(&["A", "B", "N"]));
        assert_eq!(gallery.reorder(0, 2), None);

        let next = gallery.reject(first.id, "stale").unwrap();
        assert_eq!(next.images, refs(&["B", "N", "A"]));
        assert_eq!(gallery.images(), refs(&["B", "N", "A"]).as_slice());
        assert_eq!(gallery.status(), &SyncStatus::Pending);
    }

    #[test]
    fn test_upload_slot_is_exclusive() {
        let mut gallery = Gallery::new(refs(&["A"]));

        assert!(gallery.begin_upload());
        assert!(gallery.is_uploading());
        assert!(!gallery.begin_upload());

        gallery.finish_upload(Some(refs(&["A", "B", "C"])));
        assert!(!gallery.is_uploading());
        assert_eq!(gallery.images(), refs(&["A", "B", "C"]).as_slice());
        assert!(gallery.begin_upload());
    }

    #[test]
    fn test_failed_upload_keeps_list() {
        let mut gallery = Gallery::new(refs(&["A"]));
        assert!(gallery.begin_upload());
        gallery.finish_upload(None);
        assert!(!gallery.is_uploading());
        assert_eq!(gallery.images(), refs(&["A"]).as_slice());
    }

    #[test]
    fn test_image_ref_is_transparent() {
        let json = serde_json::to_string(&refs(&["https://cdn/a.png"])).unwrap();
        assert_eq!(json, r#"["https://cdn/a.png"]"#);
        assert_eq!(ImageRef::from("x").to_string(), "x");
    }
}
