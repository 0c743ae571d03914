//! Color handling for Draftkit shapes
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Appearance bags store colors either as CSS strings
//! or as packed `0xRRGGBB` numbers; both resolve to a [`Color`].

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use draftkit_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Create a `Color` from a packed `0xRRGGBB` number.
    ///
    /// Values outside the 24-bit range are masked.
    ///
    /// # Examples
    ///
    /// ```
    /// use draftkit_core::color::Color;
    ///
    /// let gray = Color::from_rgb_number(0x333333);
    /// assert_eq!(gray, Color::new("#333333").unwrap());
    /// ```
    pub fn from_rgb_number(value: u32) -> Self {
        let hex = format!("#{:06x}", value & 0x00ff_ffff);
        Self::new(&hex).expect("six hex digits are a valid CSS color")
    }

    /// The fully transparent color, used as the fill baseline of stroked primitives.
    pub fn transparent() -> Self {
        Self::new("transparent").expect("'transparent' is a valid CSS color")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert!(red.is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
    }

    #[test]
    fn test_color_from_rgb_number() {
        assert_eq!(
            Color::from_rgb_number(0xff0000),
            Color::new("#ff0000").unwrap()
        );
        // High bits are ignored
        assert_eq!(
            Color::from_rgb_number(0x7f00_ff00),
            Color::new("#00ff00").unwrap()
        );
    }

    #[test]
    fn test_color_transparent() {
        assert!(Color::transparent().color.components[3].abs() < 0.001);
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
