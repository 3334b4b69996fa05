use std::collections::BTreeSet;
use tracing::{debug, info, trace, warn};

use crate::domain::slot::{ElementRegistry, GallerySlot, SlotId, SlotStatus, TriggerOutcome};
use crate::services::error_handling::GalleryError;
use crate::services::intersection::{IntersectionNotification, IntersectionWatcher};

/// Placeholder-first slot state for one gallery instance.
///
/// Every call to [`LazyLoader::activate`] starts a new generation: the previous
/// watcher is disconnected, slots are rebuilt from the new sources, and element
/// handles or notifications tagged with an older generation are ignored.
pub struct LazyLoader<W: IntersectionWatcher> {
    placeholder: String,
    slots: Vec<GallerySlot>,
    elements: ElementRegistry<W::Handle>,
    observed: BTreeSet<SlotId>,
    watcher: Option<W>,
    generation: u64,
}

/// What one notification batch changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub upgraded: Vec<SlotId>,
    pub skipped: Vec<SlotId>,
    pub stale: bool,
}

impl BatchReport {
    fn stale() -> Self {
        Self { stale: true, ..Self::default() }
    }
}

impl<W: IntersectionWatcher> LazyLoader<W> {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            slots: Vec::new(),
            elements: ElementRegistry::new(),
            observed: BTreeSet::new(),
            watcher: None,
            generation: 0,
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The generation the next `activate` call will use. Watchers are built
    /// before activation so their callbacks can carry it.
    fn next_generation(&self) -> u64 {
        self.generation + 1
    }

    pub fn slots(&self) -> &[GallerySlot] {
        &self.slots
    }

    pub fn displayed_source(&self, slot: SlotId) -> Option<&str> {
        self.slots
            .get(slot.index())
            .map(|state| state.displayed_source(&self.placeholder))
    }

    #[cfg(test)]
    pub(crate) fn is_watching(&self, slot: SlotId) -> bool {
        self.observed.contains(&slot)
    }

    pub fn watched_count(&self) -> usize {
        self.observed.len()
    }

    /// Element handles still held for slots that have not triggered.
    #[cfg(test)]
    pub(crate) fn mounted_count(&self) -> usize {
        self.elements.len()
    }

    #[cfg(test)]
    pub(crate) fn has_watcher(&self) -> bool {
        self.watcher.is_some()
    }

    pub fn loaded_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.status() == SlotStatus::Loaded)
            .count()
    }

    /// Tears down the current generation and starts a new one for `sources`,
    /// watched by `watcher`. Elements register themselves through
    /// [`LazyLoader::attach`] as they mount.
    pub fn activate<S: AsRef<str>>(&mut self, sources: &[S], watcher: W) -> u64 {
        self.begin_generation(sources);
        self.watcher = Some(watcher);
        debug!(
            generation = self.generation,
            slots = self.slots.len(),
            "Gallery activated"
        );
        self.generation
    }

    /// Disconnects the current watcher, then builds the next one with
    /// `make_watcher` (given the generation it will serve) and activates it.
    /// If building fails the gallery is left torn down.
    pub fn activate_with<S, F>(&mut self, sources: &[S], make_watcher: F) -> Result<u64, GalleryError>
    where
        S: AsRef<str>,
        F: FnOnce(u64) -> Result<W, GalleryError>,
    {
        self.teardown();
        let watcher = make_watcher(self.next_generation())?;
        Ok(self.activate(sources, watcher))
    }

    /// Starts a new generation without a watcher and upgrades every slot at
    /// once. Used when the host has no intersection capability.
    pub fn activate_eager<S: AsRef<str>>(&mut self, sources: &[S]) -> u64 {
        self.begin_generation(sources);
        for slot in &mut self.slots {
            slot.trigger();
        }
        debug!(
            generation = self.generation,
            slots = self.slots.len(),
            "Gallery activated without intersection watcher"
        );
        self.generation
    }

    fn begin_generation<S: AsRef<str>>(&mut self, sources: &[S]) {
        self.teardown();
        if !self.elements.is_empty() {
            trace!(released = self.elements.len(), "Releasing element handles");
            self.elements.clear();
        }
        self.generation += 1;
        self.slots = sources
            .iter()
            .enumerate()
            .map(|(index, source)| GallerySlot::new(SlotId(index), source.as_ref()))
            .collect();
    }

    /// Registers a freshly mounted element. Elements from an older generation,
    /// unknown slots and already triggered slots are not observed.
    pub fn attach(&mut self, generation: u64, slot: SlotId, handle: W::Handle) {
        if generation != self.generation {
            trace!(generation, current = self.generation, %slot, "Ignoring element from stale render");
            return;
        }

        let Some(state) = self.slots.get(slot.index()) else {
            warn!(%slot, slots = self.slots.len(), "Mounted element has no matching slot");
            return;
        };

        if !state.is_triggered() && !self.observed.contains(&slot) {
            if let Some(watcher) = self.watcher.as_mut() {
                watcher.observe(slot, &handle);
                self.observed.insert(slot);
            }
        }

        if self.elements.attach(slot, handle).is_some() {
            trace!(%slot, "Replaced element handle");
        }
    }

    /// Applies one batch of notifications from the watcher of `generation`.
    pub fn handle_notifications<I>(&mut self, generation: u64, batch: I) -> BatchReport
    where
        I: IntoIterator<Item = IntersectionNotification>,
    {
        if generation != self.generation || self.watcher.is_none() {
            trace!(generation, current = self.generation, "Dropping stale notification batch");
            return BatchReport::stale();
        }

        let mut report = BatchReport::default();

        for notification in batch {
            if !notification.is_intersecting {
                continue;
            }

            let slot = notification.target;
            if !self.observed.remove(&slot) {
                trace!(%slot, "Notification for a slot that is not watched");
                continue;
            }

            match self.slots[slot.index()].trigger() {
                TriggerOutcome::Upgraded(url) => {
                    info!(%slot, url = %url, "Image loaded");
                    report.upgraded.push(slot);
                }
                TriggerOutcome::Skipped => {
                    debug!(%slot, "Slot has no pending URL, skipping");
                    report.skipped.push(slot);
                }
                TriggerOutcome::AlreadyTriggered => {}
            }

            // the handle is only kept around to unobserve it
            if let (Some(watcher), Some(handle)) = (self.watcher.as_mut(), self.elements.detach(slot)) {
                watcher.unobserve(slot, &handle);
            }
        }

        report
    }

    /// Disconnects and discards the watcher. Slot state is kept as rendered.
    pub fn teardown(&mut self) {
        if let Some(mut watcher) = self.watcher.take() {
            watcher.disconnect();
            debug!(generation = self.generation, watched = self.observed.len(), "Watcher disconnected");
        }
        self.observed.clear();
    }
}

impl<W: IntersectionWatcher> Drop for LazyLoader<W> {
    fn drop(&mut self) {
        self.teardown();
    }
}
