//! Visit Recording Workflow
//!
//! The pure state behind the "record a visit" dialog: the draft, the submit
//! payload rules, the double-submit guard, and queue reconciliation. The
//! dialog component in `components/visit_dialog.rs` is a thin reactive shell
//! over this module, which keeps the rules host-testable.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use crate::api;
use crate::models::{Child, ChildId, Coordinate, NewVisit};
use crate::store::VisitQueue;

/// Where the dialog was opened from. A successful visit dequeues the child
/// only when it came from the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOrigin {
    Queue,
    Direct,
}

/// Which submit action the user triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Record with whatever coordinate was captured (possibly none).
    WithLocation,
    /// Record without a location, discarding any captured coordinate.
    SkipLocation,
}

/// Ephemeral per-dialog draft. Created on open, dropped on close.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitDraft {
    pub child_id: ChildId,
    pub notes: String,
    pub captured: Option<Coordinate>,
    pub persist_to_child: bool,
}

impl VisitDraft {
    pub fn new(child_id: ChildId) -> Self {
        Self {
            child_id,
            notes: String::new(),
            captured: None,
            persist_to_child: false,
        }
    }

    /// Build the wire payload for this draft.
    ///
    /// `SkipLocation` omits the coordinate even when one was captured, and a
    /// persist request without a coordinate is meaningless, so the flag goes
    /// out as false in both of those cases.
    pub fn payload(&self, mode: SubmitMode) -> NewVisit {
        let coordinate = match mode {
            SubmitMode::WithLocation => self.captured,
            SubmitMode::SkipLocation => None,
        };
        NewVisit {
            child_id: self.child_id,
            notes: self.notes.clone(),
            visit_latitude: coordinate.map(|c| c.lat),
            visit_longitude: coordinate.map(|c| c.lng),
            save_location_to_child: self.persist_to_child && coordinate.is_some(),
        }
    }
}

/// Submission phase of one open dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPhase {
    #[default]
    Editing,
    Submitting,
}

impl DialogPhase {
    /// Enter `Submitting` unless a submission is already in flight. Returns
    /// whether the caller won the transition; repeat triggers get `false`.
    pub fn begin_submit(&mut self) -> bool {
        match self {
            DialogPhase::Editing => {
                *self = DialogPhase::Submitting;
                true
            }
            DialogPhase::Submitting => false,
        }
    }

    /// Back to `Editing` once the API call resolved, whatever the outcome.
    pub fn finish_submit(&mut self) {
        *self = DialogPhase::Editing;
    }
}

/// Queue reconciliation after the API accepted the visit.
pub fn settle_successful_visit(queue: &VisitQueue, origin: VisitOrigin, child_id: ChildId) {
    if origin == VisitOrigin::Queue {
        queue.remove(child_id);
    }
}

/// Reorder fan-out results to queue order, dropping the ids whose lookup
/// failed. The persisted queue is left alone: a fetch failure hides the entry
/// from the display list without forgetting it.
fn ordered_found(mut found: Vec<(usize, Child)>) -> Vec<Child> {
    found.sort_by_key(|(index, _)| *index);
    found.into_iter().map(|(_, child)| child).collect()
}

/// Load the child records behind a list of queued ids: one concurrent lookup
/// per id, joined via `Promise.all`, tolerating individual failures.
pub async fn fetch_children_tolerant(ids: &[ChildId]) -> Vec<Child> {
    let found: Rc<RefCell<Vec<(usize, Child)>>> = Rc::new(RefCell::new(Vec::new()));
    let lookups = js_sys::Array::new();
    for (index, id) in ids.iter().copied().enumerate() {
        let found = Rc::clone(&found);
        lookups.push(&future_to_promise(async move {
            if let Ok(child) = api::get_child(id).await {
                found.borrow_mut().push((index, child));
            }
            Ok(JsValue::UNDEFINED)
        }));
    }
    let _ = JsFuture::from(js_sys::Promise::all(&lookups)).await;
    let found = found.borrow().clone();
    ordered_found(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBackend, VisitQueue};
    use std::sync::Arc;

    fn child(id: u32) -> Child {
        Child {
            id: ChildId(id),
            full_name: format!("Child {id}"),
            date_of_birth: None,
            address: None,
            latitude: None,
            longitude: None,
            image_url: None,
            class_id: None,
            class_name: None,
            academic_year_id: None,
            academic_year_name: None,
            parent_phones: Vec::new(),
            visits: Vec::new(),
        }
    }

    fn seeded_queue(ids: &[u32]) -> VisitQueue {
        let queue = VisitQueue::new(Arc::new(MemoryBackend::default()));
        for id in ids {
            queue.add(ChildId(*id));
        }
        queue
    }

    #[test]
    fn payload_with_location_carries_capture() {
        let mut draft = VisitDraft::new(ChildId(5));
        draft.notes = "met the family".into();
        draft.captured = Coordinate::new(30.05, 31.24);
        draft.persist_to_child = true;

        let body = draft.payload(SubmitMode::WithLocation);
        assert_eq!(body.visit_latitude, Some(30.05));
        assert_eq!(body.visit_longitude, Some(31.24));
        assert!(body.save_location_to_child);
    }

    #[test]
    fn skip_location_discards_captured_coordinate() {
        let mut draft = VisitDraft::new(ChildId(5));
        draft.captured = Coordinate::new(30.05, 31.24);
        draft.persist_to_child = true;

        let body = draft.payload(SubmitMode::SkipLocation);
        assert_eq!(body.visit_latitude, None);
        assert_eq!(body.visit_longitude, None);
        assert!(!body.save_location_to_child);
    }

    #[test]
    fn persist_flag_without_coordinate_is_forced_false() {
        let mut draft = VisitDraft::new(ChildId(5));
        draft.persist_to_child = true;

        let body = draft.payload(SubmitMode::WithLocation);
        assert_eq!(body.visit_latitude, None);
        assert!(!body.save_location_to_child);
    }

    #[test]
    fn double_submit_is_guarded() {
        let mut phase = DialogPhase::default();
        assert!(phase.begin_submit());
        assert!(!phase.begin_submit());
        phase.finish_submit();
        assert!(phase.begin_submit());
    }

    #[test]
    fn successful_queue_visit_dequeues() {
        let queue = seeded_queue(&[5, 9]);
        settle_successful_visit(&queue, VisitOrigin::Queue, ChildId(5));
        assert_eq!(queue.list(), vec![ChildId(9)]);
    }

    #[test]
    fn successful_direct_visit_leaves_queue_alone() {
        let queue = seeded_queue(&[5, 9]);
        settle_successful_visit(&queue, VisitOrigin::Direct, ChildId(5));
        assert_eq!(queue.list(), vec![ChildId(5), ChildId(9)]);
    }

    #[test]
    fn failed_submit_preserves_draft_and_queue() {
        let queue = seeded_queue(&[5]);
        let mut draft = VisitDraft::new(ChildId(5));
        draft.notes = "checked in".into();

        // A failed API call performs no settlement; the draft stays editable.
        let mut phase = DialogPhase::default();
        assert!(phase.begin_submit());
        phase.finish_submit();

        assert_eq!(draft.notes, "checked in");
        assert_eq!(queue.list(), vec![ChildId(5)]);
    }

    #[test]
    fn fan_out_results_keep_queue_order_and_drop_failures() {
        // Lookups for ids [1, 2, 3] where 2 failed, completing out of order.
        let found = vec![(2, child(3)), (0, child(1))];
        let shown = ordered_found(found);
        assert_eq!(
            shown.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![ChildId(1), ChildId(3)]
        );

        let queue = seeded_queue(&[1, 2, 3]);
        assert_eq!(queue.list(), vec![ChildId(1), ChildId(2), ChildId(3)]);
    }
}
