use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::domain::slot::SlotId;
use crate::domain::watcher_options::WatcherOptions;
use crate::services::error_handling::GalleryError;
use crate::services::intersection::{IntersectionNotification, IntersectionWatcher};

/// Attribute carrying the slot index on every gallery image.
pub const SLOT_ATTRIBUTE: &str = "data-slot";

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// [`IntersectionWatcher`] backed by the browser's `IntersectionObserver`.
///
/// Dropping the watcher disconnects the observer.
pub struct DomWatcher {
    observer: IntersectionObserver,
    // Must outlive the observer, which only holds a JS reference to it.
    _callback: EntriesCallback,
}

impl DomWatcher {
    pub fn new<F>(options: &WatcherOptions, mut on_batch: F) -> Result<Self, GalleryError>
    where
        F: FnMut(Vec<IntersectionNotification>) + 'static,
    {
        if !cfg!(target_arch = "wasm32") {
            return Err(GalleryError::HostUnavailable);
        }

        let callback: EntriesCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
            let batch: Vec<_> = entries
                .iter()
                .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| notification_from_entry(&entry, &observer))
                .collect();
            if !batch.is_empty() {
                on_batch(batch);
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&options.root_margin().to_string());
        init.set_threshold(&JsValue::from_f64(options.threshold()));

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|err| GalleryError::host("IntersectionObserver::new", describe(&err)))?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl IntersectionWatcher for DomWatcher {
    type Handle = Element;

    fn observe(&mut self, _slot: SlotId, handle: &Element) {
        self.observer.observe(handle);
    }

    fn unobserve(&mut self, _slot: SlotId, handle: &Element) {
        self.observer.unobserve(handle);
    }

    fn disconnect(&mut self) {
        self.observer.disconnect();
    }
}

impl Drop for DomWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Reads the slot index an element was rendered with.
pub fn slot_of(element: &Element) -> Option<SlotId> {
    element
        .get_attribute(SLOT_ATTRIBUTE)?
        .parse()
        .ok()
        .map(SlotId)
}

// Untagged elements cannot be routed to a slot, so they are dropped here.
fn notification_from_entry(
    entry: &IntersectionObserverEntry,
    observer: &IntersectionObserver,
) -> Option<IntersectionNotification> {
    let target = entry.target();
    match slot_of(&target) {
        Some(slot) => Some(IntersectionNotification {
            target: slot,
            is_intersecting: entry.is_intersecting(),
        }),
        None => {
            tracing::warn!(tag = %target.tag_name(), "Observed element has no slot attribute");
            if entry.is_intersecting() {
                observer.unobserve(&target);
            }
            None
        }
    }
}

fn describe(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
