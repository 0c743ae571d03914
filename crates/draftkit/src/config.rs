//! Configuration types for Draftkit rendering.
//!
//! This module provides configuration structures that control how the
//! retained scene is exported and how the shape gallery is laid out. All
//! types implement [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining export and gallery settings.
//! - [`ExportConfig`] - Controls the exported SVG document (background, padding).
//! - [`GalleryConfig`] - Controls the grid used to lay out gallery items.
//!
//! # Example
//!
//! ```
//! # use draftkit::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.export().background_color().is_ok());
//! assert_eq!(config.gallery().columns(), 4);
//! ```

use serde::Deserialize;

use draftkit_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,

    /// Gallery configuration section.
    #[serde(default)]
    gallery: GalleryConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified export and gallery configurations.
    pub fn new(export: ExportConfig, gallery: GalleryConfig) -> Self {
        Self { export, gallery }
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Returns the gallery configuration.
    pub fn gallery(&self) -> &GalleryConfig {
        &self.gallery
    }
}

/// Settings for the exported SVG document.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Document background, as a color string. No background when unset.
    background_color: Option<String>,

    /// Space added around the scene bounds on every side.
    padding: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            padding: 20.0,
        }
    }
}

impl ExportConfig {
    pub fn new(background_color: Option<String>, padding: f32) -> Self {
        Self {
            background_color,
            padding,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }
}

/// Grid layout of the shape gallery.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    columns: usize,
    spacing: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            columns: 4,
            spacing: 40.0,
        }
    }
}

impl GalleryConfig {
    pub fn new(columns: usize, spacing: f32) -> Self {
        Self { columns, spacing }
    }

    /// Number of items per row, never less than one
    pub fn columns(&self) -> usize {
        self.columns.max(1)
    }

    /// Gap between neighbouring cells
    pub fn spacing(&self) -> f32 {
        self.spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.export().background_color(), Ok(None));
        assert!((config.export().padding() - 20.0).abs() < f32::EPSILON);
        assert_eq!(config.gallery().columns(), 4);
    }

    #[test]
    fn test_invalid_background_color() {
        let export = ExportConfig::new(Some("not-a-color".to_string()), 0.0);
        let err = export.background_color().unwrap_err();
        assert!(err.starts_with("Invalid background color in config"));
    }

    #[test]
    fn test_zero_columns_clamped() {
        assert_eq!(GalleryConfig::new(0, 10.0).columns(), 1);
    }
}
