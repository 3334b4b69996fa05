use dioxus::prelude::*;
use futures_util::StreamExt;
use web_sys::Element as DomElement;

use crate::config::GalleryConfig;
use crate::domain::slot::SlotId;
use crate::services::{DomWatcher, IntersectionNotification, LazyLoader, LogHelper};

type NotificationBatch = (u64, Vec<IntersectionNotification>);

/// Grid of placeholder images that swap in their real source on first
/// intersection with the scroll area.
#[component]
pub fn ImageGallery(images: ReadOnlySignal<Vec<String>>) -> Element {
    let config = try_use_context::<GalleryConfig>().unwrap_or_default();

    let mut loader = use_signal({
        let placeholder = config.placeholder_url.clone();
        move || LazyLoader::<DomWatcher>::new(placeholder)
    });

    // Observer callbacks fire outside the renderer; batches are applied here.
    let notifications = use_coroutine(move |mut rx: UnboundedReceiver<NotificationBatch>| async move {
        while let Some((generation, batch)) = rx.next().await {
            let report = loader.write().handle_notifications(generation, batch);
            if report.stale {
                continue;
            }
            let state = loader.peek();
            tracing::trace!(
                generation,
                upgraded = report.upgraded.len(),
                skipped = report.skipped.len(),
                loaded = state.loaded_count(),
                watching = state.watched_count(),
                "Applied intersection batch"
            );
        }
    });

    // Re-runs whenever `images` changes. The previous watcher is disconnected
    // before the next one is built.
    use_effect({
        let config = config.clone();
        move || {
            let sources = images.read().clone();

            let activated = config.watcher_options().and_then(|options| {
                loader.write().activate_with(&sources, |generation| {
                    DomWatcher::new(&options, move |batch| notifications.send((generation, batch)))
                })
            });

            if let Err(err) = activated {
                LogHelper::log_degraded("creating intersection watcher", &err);
                loader.write().activate_eager(&sources);
            }
        }
    });

    let grid_style = config.grid_style();
    let image_style = config.image_style();

    let (generation, cells) = {
        let state = loader.read();
        let cells: Vec<(SlotId, String, String)> = state
            .slots()
            .iter()
            .map(|slot| {
                (
                    slot.id(),
                    slot.displayed_source(state.placeholder()).to_string(),
                    slot.pending_url().unwrap_or_default().to_string(),
                )
            })
            .collect();
        (state.generation(), cells)
    };

    rsx! {
        div {
            class: "image-gallery",
            style: "{grid_style}",

            for (slot, src, pending) in cells {
                GalleryCell {
                    key: "{generation}-{slot}",
                    slot,
                    generation,
                    src,
                    pending,
                    image_style: image_style.clone(),
                    loader,
                }
            }
        }
    }
}

#[component]
fn GalleryCell(
    slot: SlotId,
    generation: u64,
    src: String,
    pending: String,
    image_style: String,
    mut loader: Signal<LazyLoader<DomWatcher>>,
) -> Element {
    rsx! {
        div {
            style: "position: relative;",

            img {
                src: "{src}",
                "data-src": "{pending}",
                // read back by the watcher via `dom_watcher::slot_of`
                "data-slot": "{slot}",
                alt: "Image {slot}",
                style: "{image_style}",
                onmounted: move |event: MountedEvent| {
                    let element = event.data().downcast::<DomElement>().cloned();
                    if let Some(element) = element {
                        loader.write().attach(generation, slot, element);
                    }
                },
            }
        }
    }
}
