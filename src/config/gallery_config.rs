use serde::{Deserialize, Serialize};

use crate::domain::image::UrlTemplate;
use crate::domain::watcher_options::{RootMargin, WatcherOptions};
use crate::services::error_handling::GalleryError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// How many images the gallery shows
    pub image_count: usize,

    /// Image endpoint, `{index}` is replaced by the 1-based position
    pub url_template: UrlTemplate,

    /// Shown in every cell until its real image is triggered
    pub placeholder_url: String,

    /// Distance outside the scroll area at which images start loading
    pub root_margin: RootMargin,

    /// Visible fraction of a cell that triggers loading
    pub threshold: f64,

    pub columns: u32,
    pub gap_px: u32,
    pub cell_height_px: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            image_count: 100,
            url_template: UrlTemplate::default(),
            placeholder_url: "https://via.placeholder.com/200x300?text=Loading".to_string(),
            root_margin: RootMargin::default(),
            threshold: 0.1,
            columns: 3,
            gap_px: 10,
            cell_height_px: 200,
        }
    }
}

impl GalleryConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, GalleryError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GalleryError> {
        if self.columns == 0 {
            return Err(GalleryError::ZeroColumns);
        }
        self.watcher_options().map(|_| ())
    }

    pub fn watcher_options(&self) -> Result<WatcherOptions, GalleryError> {
        WatcherOptions::new(self.root_margin.clone(), self.threshold)
    }

    /// Inline style of the grid container
    pub fn grid_style(&self) -> String {
        format!(
            "display: grid; grid-template-columns: repeat({}, 1fr); gap: {}px;",
            self.columns, self.gap_px
        )
    }

    /// Inline style of each image
    pub fn image_style(&self) -> String {
        format!(
            "width: 100%; height: {}px; object-fit: cover; background-color: gray;",
            self.cell_height_px
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GalleryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.image_count, 100);
        assert_eq!(config.root_margin.to_string(), "100px");
        assert_eq!(config.threshold, 0.1);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GalleryConfig::from_toml_str("image_count = 12\ncolumns = 4\n").unwrap();

        assert_eq!(config.image_count, 12);
        assert_eq!(config.columns, 4);
        assert_eq!(config.placeholder_url, GalleryConfig::default().placeholder_url);
        assert_eq!(config.url_template, UrlTemplate::default());
    }

    #[test]
    fn test_styles_follow_layout_settings() {
        let config = GalleryConfig {
            columns: 2,
            gap_px: 4,
            cell_height_px: 150,
            ..Default::default()
        };

        assert_eq!(
            config.grid_style(),
            "display: grid; grid-template-columns: repeat(2, 1fr); gap: 4px;"
        );
        assert!(config.image_style().contains("height: 150px"));
    }

    #[test]
    fn test_zero_columns_rejected() {
        let err = GalleryConfig::from_toml_str("columns = 0").unwrap_err();
        assert!(matches!(err, GalleryError::ZeroColumns));
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let err = GalleryConfig::from_toml_str("threshold = 2.0").unwrap_err();
        assert!(matches!(err, GalleryError::InvalidThreshold { .. }));
    }

    #[test]
    fn test_bad_template_surfaces_as_parse_error() {
        let err = GalleryConfig::from_toml_str("url_template = \"https://img.test/a.jpg\"").unwrap_err();
        match err {
            GalleryError::ConfigParse(inner) => {
                assert!(inner.to_string().contains("{index}"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
