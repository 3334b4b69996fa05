use dioxus::prelude::*;

use crate::config::GalleryConfig;
use crate::domain::image::generate_image_urls;
use crate::ui_dioxus::components::ImageGallery;

#[component]
pub fn App() -> Element {
    let config = try_use_context::<GalleryConfig>().unwrap_or_default();
    let mut images = use_signal(Vec::<String>::new);

    // Reads no signals, so the list is generated once per mount
    use_effect({
        let config = config.clone();
        move || {
            let urls = generate_image_urls(config.image_count, &config.url_template);
            tracing::debug!(count = urls.len(), "Generated image sources");
            images.set(urls);
        }
    });

    rsx! {
        main {
            style: "display: flex; align-items: center; flex-direction: column; width: 100%;",

            h1 { "Lazy loading with IntersectionObserver" }

            div {
                class: "gallery-viewport",
                style: "max-width: 600px; max-height: 500px; width: 100%; overflow-y: scroll; border: 20px solid #eee; border-radius: 10px;",

                ImageGallery { images: images() }
            }
        }
    }
}
