use crate::domain::slot::SlotId;

#[cfg(test)]
use mockall::automock;

/// One entry of a batch delivered by an [`IntersectionWatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionNotification {
    pub target: SlotId,
    pub is_intersecting: bool,
}

impl IntersectionNotification {
    pub fn entering(target: SlotId) -> Self {
        Self { target, is_intersecting: true }
    }

    pub fn leaving(target: SlotId) -> Self {
        Self { target, is_intersecting: false }
    }
}

/// Viewport-intersection capability supplied by the host.
///
/// Implementations deliver notifications asynchronously, in batches, through
/// whatever callback they were constructed with. None of these methods may
/// call back synchronously.
#[cfg_attr(test, automock(type Handle = u32;))]
pub trait IntersectionWatcher {
    /// The host's element reference.
    type Handle;

    fn observe(&mut self, slot: SlotId, handle: &Self::Handle);

    fn unobserve(&mut self, slot: SlotId, handle: &Self::Handle);

    /// Stops watching everything; the watcher is not reused afterwards.
    fn disconnect(&mut self);
}
