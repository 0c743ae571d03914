//! Stroke and text-alignment keywords.
//!
//! # Overview
//!
//! Exported types:
//! - [`StrokeCap`]: How line endpoints are rendered (butt, round, square)
//! - [`StrokeJoin`]: How line corners are rendered (miter, round, bevel)
//! - [`TextAlignment`]: Horizontal text alignment (left, center, right)
//! - [`VerticalAlignment`]: Vertical text alignment (top, middle, bottom)
//!
//! Every type maps to its SVG/CSS keyword through `to_svg_value` and parses
//! from the same keyword through [`FromStr`].
//!
//! | Type | Attribute | Values |
//! |------|-----------|--------|
//! | [`StrokeCap`] | `stroke-linecap` | `"butt"`, `"round"`, `"square"` |
//! | [`StrokeJoin`] | `stroke-linejoin` | `"miter"`, `"round"`, `"bevel"` |
//! | [`TextAlignment`] | `text-align` | `"left"`, `"center"`, `"right"` |
//! | [`VerticalAlignment`] | `vertical-align` | `"top"`, `"middle"`, `"bottom"` |

use std::{fmt, str::FromStr};

/// Defines how line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    /// Flat cap at the exact endpoint (SVG default)
    #[default]
    Butt,
    /// Rounded cap extending beyond the endpoint by half the stroke width
    Round,
    /// Square cap extending beyond the endpoint by half the stroke width
    Square,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl FromStr for StrokeCap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            _ => Err(format!(
                "invalid stroke cap `{s}`, valid values: butt, round, square"
            )),
        }
    }
}

/// Defines how line corners (joins) are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    /// Sharp corner with mitered point (SVG default)
    #[default]
    Miter,
    /// Rounded corner
    Round,
    /// Beveled (cut-off) corner
    Bevel,
}

impl StrokeJoin {
    /// Returns the SVG stroke-linejoin value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

impl FromStr for StrokeJoin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miter" => Ok(Self::Miter),
            "round" => Ok(Self::Round),
            "bevel" => Ok(Self::Bevel),
            _ => Err(format!(
                "invalid stroke join `{s}`, valid values: miter, round, bevel"
            )),
        }
    }
}

/// Horizontal alignment of text inside its box.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlignment {
    /// Returns the CSS text-align value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl FromStr for TextAlignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(format!(
                "invalid text alignment `{s}`, valid values: left, center, right"
            )),
        }
    }
}

impl fmt::Display for TextAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_svg_value())
    }
}

/// Vertical alignment of text inside its box.
///
/// Single-line text is centered (`Middle`); multi-line text starts at the top.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl VerticalAlignment {
    /// Returns the CSS vertical-align value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

impl FromStr for VerticalAlignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "middle" => Ok(Self::Middle),
            "bottom" => Ok(Self::Bottom),
            _ => Err(format!(
                "invalid vertical alignment `{s}`, valid values: top, middle, bottom"
            )),
        }
    }
}
