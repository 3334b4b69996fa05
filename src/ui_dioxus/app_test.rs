#[cfg(test)]
mod tests {
    use dioxus::dioxus_core::{AttributeValue, Mutation};
    use dioxus::prelude::*;
    use futures_util::FutureExt;

    use crate::config::GalleryConfig;
    use crate::domain::image::{UrlTemplate, generate_image_urls};
    use crate::ui_dioxus::App;
    use crate::ui_dioxus::components::ImageGallery;

    /// Effects and the state writes they trigger need a few passes to settle.
    fn render_until_idle(vdom: &mut VirtualDom) -> Vec<Mutation> {
        let mut edits = vdom.rebuild_to_vec().edits;
        for _ in 0..20 {
            let _ = vdom.wait_for_work().now_or_never();
            edits.extend(vdom.render_immediate_to_vec().edits);
        }
        edits
    }

    fn attribute_values(edits: &[Mutation], attribute: &str) -> Vec<String> {
        edits
            .iter()
            .filter_map(|edit| match edit {
                Mutation::SetAttribute {
                    name,
                    value: AttributeValue::Text(text),
                    ..
                } if *name == attribute => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_app_renders_one_cell_per_generated_url() {
        let mut vdom = VirtualDom::new(App);
        let edits = render_until_idle(&mut vdom);

        let expected = generate_image_urls(100, &UrlTemplate::default());
        let alts: Vec<String> = (0..100).map(|index| format!("Image {index}")).collect();

        assert_eq!(attribute_values(&edits, "alt"), alts);
        assert_eq!(attribute_values(&edits, "data-src"), expected);
    }

    #[test]
    fn test_without_host_watcher_every_cell_shows_its_real_url() {
        let mut vdom = VirtualDom::new(App);
        let edits = render_until_idle(&mut vdom);

        let sources = attribute_values(&edits, "src");
        assert_eq!(sources, generate_image_urls(100, &UrlTemplate::default()));
        assert!(
            !sources.iter().any(|src| src == &GalleryConfig::default().placeholder_url),
            "eager activation leaves no placeholder behind"
        );
    }

    #[test]
    fn test_rerender_does_not_regenerate_the_list() {
        let mut vdom = VirtualDom::new(App);
        render_until_idle(&mut vdom);

        vdom.mark_dirty(ScopeId::ROOT);
        let mut edits = vdom.render_immediate_to_vec().edits;
        for _ in 0..5 {
            let _ = vdom.wait_for_work().now_or_never();
            edits.extend(vdom.render_immediate_to_vec().edits);
        }

        assert!(attribute_values(&edits, "data-src").is_empty());
        assert!(attribute_values(&edits, "alt").is_empty());
    }

    #[test]
    fn test_app_uses_config_from_context() {
        let config = GalleryConfig {
            image_count: 3,
            url_template: UrlTemplate::parse("https://img.test/{index}.jpg").unwrap(),
            ..GalleryConfig::default()
        };
        let mut vdom = VirtualDom::new(App).with_root_context(config);
        let edits = render_until_idle(&mut vdom);

        assert_eq!(
            attribute_values(&edits, "data-src"),
            vec![
                "https://img.test/1.jpg",
                "https://img.test/2.jpg",
                "https://img.test/3.jpg",
            ]
        );
    }

    #[component]
    fn EmptyGallery() -> Element {
        rsx! {
            ImageGallery { images: Vec::<String>::new() }
        }
    }

    #[test]
    fn test_empty_input_renders_no_cells() {
        let mut vdom = VirtualDom::new(EmptyGallery);
        let edits = render_until_idle(&mut vdom);

        assert!(attribute_values(&edits, "alt").is_empty());
        assert!(attribute_values(&edits, "src").is_empty());
    }
}
