//! The appearance bag of a diagram item.
//!
//! An [`Appearance`] is an ordered mapping from string keys to
//! [`AppearanceValue`]s. It holds the well-known styling keys listed in
//! [`keys`] as well as arbitrary per-shape keys (for example a radio button's
//! `STATE`). The render core only reads it.
//!
//! # Example
//!
//! ```
//! # use draftkit_core::appearance::{Appearance, keys};
//! let mut appearance = Appearance::new();
//! appearance.set(keys::TEXT, "Dropdown");
//! appearance.set(keys::FONT_SIZE, 14.0);
//! appearance.set(keys::STROKE_COLOR, 0x333333);
//!
//! assert_eq!(appearance.text(keys::TEXT), Some("Dropdown"));
//! assert_eq!(appearance.number(keys::FONT_SIZE), Some(14.0));
//! assert!(appearance.color(keys::STROKE_COLOR).is_some());
//! ```

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Well-known appearance keys shared by the built-in shapes.
pub mod keys {
    pub const FOREGROUND_COLOR: &str = "FOREGROUND_COLOR";
    pub const BACKGROUND_COLOR: &str = "BACKGROUND_COLOR";
    pub const STROKE_COLOR: &str = "STROKE_COLOR";
    pub const STROKE_THICKNESS: &str = "STROKE_THICKNESS";
    pub const TEXT: &str = "TEXT";
    pub const TEXT_ALIGNMENT: &str = "TEXT_ALIGNMENT";
    pub const TEXT_DISABLED: &str = "TEXT_DISABLED";
    pub const FONT_SIZE: &str = "FONT_SIZE";
    pub const FONT_FAMILY: &str = "FONT_FAMILY";
    pub const ICON_FONT_FAMILY: &str = "ICON_FONT_FAMILY";
    pub const OPACITY: &str = "OPACITY";
}

/// A single appearance value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppearanceValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AppearanceValue {
    /// Returns the value as a number. Text is parsed, booleans are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Interprets the value as a color.
    ///
    /// Numbers are packed `0xRRGGBB` values; text is any CSS color string.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Number(value) if value.is_finite() && *value >= 0.0 => {
                Some(Color::from_rgb_number(*value as u32))
            }
            Self::Text(text) => match Color::new(text) {
                Ok(color) => Some(color),
                Err(err) => {
                    debug!(error = err.as_str(); "Ignoring unparsable appearance color");
                    None
                }
            },
            _ => None,
        }
    }
}

impl From<bool> for AppearanceValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for AppearanceValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for AppearanceValue {
    fn from(value: f32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for AppearanceValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for AppearanceValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for AppearanceValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AppearanceValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Ordered mapping from appearance keys to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Appearance {
    values: IndexMap<String, AppearanceValue>,
}

impl Appearance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, keeping the original position of an existing key.
    pub fn set(&mut self, key: &str, value: impl Into<AppearanceValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Builder-style variant of [`Appearance::set`].
    pub fn with(mut self, key: &str, value: impl Into<AppearanceValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AppearanceValue> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<AppearanceValue> {
        self.values.shift_remove(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(AppearanceValue::as_number)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AppearanceValue::as_text)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(AppearanceValue::as_bool)
    }

    pub fn color(&self, key: &str) -> Option<Color> {
        self.get(key).and_then(AppearanceValue::as_color)
    }

    /// Copies every entry of `other` that is not yet present.
    pub fn merge_defaults(&mut self, other: &Appearance) {
        for (key, value) in other.iter() {
            if !self.values.contains_key(key) {
                self.values.insert(key.to_string(), value.clone());
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AppearanceValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
