// Test helpers for integration testing

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::slot::SlotId;
use crate::services::intersection::IntersectionWatcher;

/// Stand-in for a host element reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestElement(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherCall {
    Observe(SlotId, TestElement),
    Unobserve(SlotId, TestElement),
    Disconnect,
}

/// Watcher that records every call. Clones share the same log, so a test can
/// keep one clone while the loader owns the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingWatcher {
    calls: Rc<RefCell<Vec<WatcherCall>>>,
}

impl RecordingWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<WatcherCall> {
        self.calls.borrow().clone()
    }

    pub fn observed(&self) -> Vec<SlotId> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                WatcherCall::Observe(slot, _) => Some(*slot),
                _ => None,
            })
            .collect()
    }

    pub fn unobserved(&self) -> Vec<SlotId> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                WatcherCall::Unobserve(slot, _) => Some(*slot),
                _ => None,
            })
            .collect()
    }

    pub fn disconnect_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, WatcherCall::Disconnect))
            .count()
    }
}

impl IntersectionWatcher for RecordingWatcher {
    type Handle = TestElement;

    fn observe(&mut self, slot: SlotId, handle: &TestElement) {
        self.calls.borrow_mut().push(WatcherCall::Observe(slot, *handle));
    }

    fn unobserve(&mut self, slot: SlotId, handle: &TestElement) {
        self.calls.borrow_mut().push(WatcherCall::Unobserve(slot, *handle));
    }

    fn disconnect(&mut self) {
        self.calls.borrow_mut().push(WatcherCall::Disconnect);
    }
}
