use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::error_handling::GalleryError;

/// Token replaced by the 1-based image position when rendering a [`UrlTemplate`].
pub const INDEX_PLACEHOLDER: &str = "{index}";

const DEFAULT_URL_TEMPLATE: &str = "https://picsum.photos/200/300?random={index}";

/// The real image resource a gallery slot eventually displays.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageDescriptor {
    url: String,
}

impl ImageDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn into_url(self) -> String {
        self.url
    }
}

/// An image endpoint with an `{index}` placeholder, e.g.
/// `https://picsum.photos/200/300?random={index}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn parse(template: impl Into<String>) -> Result<Self, GalleryError> {
        let template = template.into();
        if !template.contains(INDEX_PLACEHOLDER) {
            return Err(GalleryError::InvalidUrlTemplate { template });
        }
        Ok(Self(template))
    }

    /// Substitutes every `{index}` with `position`.
    pub fn render(&self, position: usize) -> String {
        self.0.replace(INDEX_PLACEHOLDER, &position.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UrlTemplate {
    fn default() -> Self {
        Self(DEFAULT_URL_TEMPLATE.to_string())
    }
}

impl TryFrom<String> for UrlTemplate {
    type Error = GalleryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<UrlTemplate> for String {
    fn from(template: UrlTemplate) -> Self {
        template.0
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds `count` descriptors, one per 1-based position, in order.
pub fn generate_descriptors(count: usize, template: &UrlTemplate) -> Vec<ImageDescriptor> {
    (1..=count)
        .map(|position| ImageDescriptor::new(template.render(position)))
        .collect()
}

/// Same as [`generate_descriptors`] but yields the bare URLs the views hold as state.
pub fn generate_image_urls(count: usize, template: &UrlTemplate) -> Vec<String> {
    generate_descriptors(count, template)
        .into_iter()
        .map(ImageDescriptor::into_url)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_template_matches_picsum_endpoint() {
        let template = UrlTemplate::default();
        assert_eq!(template.render(1), "https://picsum.photos/200/300?random=1");
        assert_eq!(template.render(100), "https://picsum.photos/200/300?random=100");
    }

    #[test]
    fn test_generated_urls_are_unique_and_positional() {
        let template = UrlTemplate::default();
        let urls = generate_image_urls(100, &template);

        assert_eq!(urls.len(), 100);
        let unique: HashSet<_> = urls.iter().collect();
        assert_eq!(unique.len(), 100);

        for (offset, url) in urls.iter().enumerate() {
            assert_eq!(url, &template.render(offset + 1));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let template = UrlTemplate::parse("https://img.test/{index}.jpg").unwrap();
        assert_eq!(
            generate_descriptors(5, &template),
            generate_descriptors(5, &template)
        );
    }

    #[test]
    fn test_zero_count_produces_nothing() {
        assert!(generate_image_urls(0, &UrlTemplate::default()).is_empty());
    }

    #[test]
    fn test_template_without_placeholder_is_rejected() {
        let err = UrlTemplate::parse("https://picsum.photos/200/300").unwrap_err();
        assert!(matches!(err, GalleryError::InvalidUrlTemplate { .. }));
    }

    #[test]
    fn test_repeated_placeholder_is_substituted_everywhere() {
        let template = UrlTemplate::parse("https://img.test/{index}?seed={index}").unwrap();
        assert_eq!(template.render(7), "https://img.test/7?seed=7");
    }
}
