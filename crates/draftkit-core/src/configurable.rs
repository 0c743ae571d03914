//! Editable property descriptors.
//!
//! A [`Configurable`] tells an editor which appearance key of an item can be
//! changed and which control to offer for it. The render core never reads
//! them; they travel with the item so the surrounding editor can build its
//! property panel.

use serde::{Deserialize, Serialize};

/// The control offered for a configurable appearance key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfigurableKind {
    /// One value out of a fixed list of options
    Selection { options: Vec<String> },
    /// A number in an inclusive range
    Slider { min: f64, max: f64 },
    /// A color picker
    Color,
    /// An on/off switch
    Toggle,
}

/// A configurable appearance key with its display label.
///
/// # Examples
///
/// ```
/// # use draftkit_core::configurable::{Configurable, ConfigurableKind};
/// let state = Configurable::selection("STATE", "State", ["Normal", "Checked"]);
/// assert_eq!(state.name(), "STATE");
/// assert!(matches!(state.kind(), ConfigurableKind::Selection { options } if options.len() == 2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configurable {
    name: String,
    label: String,
    #[serde(flatten)]
    kind: ConfigurableKind,
}

impl Configurable {
    pub fn new(name: &str, label: &str, kind: ConfigurableKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    pub fn selection<I, S>(name: &str, label: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(Into::into).collect();
        Self::new(name, label, ConfigurableKind::Selection { options })
    }

    /// A slider over `0..=100`.
    pub fn slider(name: &str, label: &str) -> Self {
        Self::slider_with_range(name, label, 0.0, 100.0)
    }

    pub fn slider_with_range(name: &str, label: &str, min: f64, max: f64) -> Self {
        Self::new(name, label, ConfigurableKind::Slider { min, max })
    }

    pub fn color(name: &str, label: &str) -> Self {
        Self::new(name, label, ConfigurableKind::Color)
    }

    pub fn toggle(name: &str, label: &str) -> Self {
        Self::new(name, label, ConfigurableKind::Toggle)
    }

    /// The appearance key this descriptor edits
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &ConfigurableKind {
        &self.kind
    }
}
