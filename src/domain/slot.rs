use std::collections::BTreeMap;
use std::fmt;

/// Stable position of a cell within the rendered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Still showing the placeholder and waiting for its first intersection.
    Waiting,
    /// The pending URL is the displayed resource.
    Loaded,
    /// Intersected without a pending URL; stays on the placeholder.
    Skipped,
}

/// Result of the first intersection of a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Upgraded(String),
    Skipped,
    AlreadyTriggered,
}

/// One grid cell of the gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySlot {
    id: SlotId,
    pending_url: Option<String>,
    status: SlotStatus,
}

impl GallerySlot {
    /// An empty `source` means the slot carries no pending URL.
    pub fn new(id: SlotId, source: &str) -> Self {
        Self {
            id,
            pending_url: (!source.is_empty()).then(|| source.to_string()),
            status: SlotStatus::Waiting,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn pending_url(&self) -> Option<&str> {
        self.pending_url.as_deref()
    }

    pub fn status(&self) -> SlotStatus {
        self.status
    }

    pub fn is_triggered(&self) -> bool {
        self.status != SlotStatus::Waiting
    }

    /// The resource the cell shows right now.
    pub fn displayed_source<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match (self.status, self.pending_url.as_deref()) {
            (SlotStatus::Loaded, Some(url)) => url,
            _ => placeholder,
        }
    }

    /// Moves the slot out of `Waiting`. Only the first call has an effect.
    pub fn trigger(&mut self) -> TriggerOutcome {
        if self.is_triggered() {
            return TriggerOutcome::AlreadyTriggered;
        }

        match &self.pending_url {
            Some(url) => {
                self.status = SlotStatus::Loaded;
                TriggerOutcome::Upgraded(url.clone())
            }
            None => {
                self.status = SlotStatus::Skipped;
                TriggerOutcome::Skipped
            }
        }
    }
}

/// Element handles keyed by slot, filled in as each element mounts.
#[derive(Debug)]
pub struct ElementRegistry<H> {
    handles: BTreeMap<SlotId, H>,
}

impl<H> Default for ElementRegistry<H> {
    fn default() -> Self {
        Self {
            handles: BTreeMap::new(),
        }
    }
}

impl<H> ElementRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the handle for `slot`, returning the one it replaces.
    pub fn attach(&mut self, slot: SlotId, handle: H) -> Option<H> {
        self.handles.insert(slot, handle)
    }

    pub fn detach(&mut self, slot: SlotId) -> Option<H> {
        self.handles.remove(&slot)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }
}
